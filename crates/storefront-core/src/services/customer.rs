//! # Customer Registration

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CoreResult, ValidationError};
use crate::ports::CustomerRepository;
use crate::types::Customer;
use crate::validation::{validate_email, validate_name};

/// Registers a customer with a unique email.
pub struct CreateCustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CreateCustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        CreateCustomerService { customers }
    }

    /// Creates the customer.
    ///
    /// Name and email are trimmed before they are checked and stored.
    ///
    /// ## Errors
    /// - [`ValidationError::Duplicate`] if the email is already registered
    /// - other [`ValidationError`]s for a malformed name or email
    pub async fn execute(&self, name: &str, email: &str) -> CoreResult<Customer> {
        let name = name.trim();
        let email = email.trim();

        validate_name(name)?;
        validate_email(email)?;

        debug!(email = %email, "Registering customer");

        if self.customers.find_by_email(email).await?.is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email.to_string(),
            }
            .into());
        }

        let customer = self.customers.create(name, email).await?;

        info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }
}

use validator::ValidateEmail;

use crate::contact::FormRelayClient;
use crate::errors::AppError;
use crate::models::ContactForm;

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_MESSAGE_LENGTH: usize = 5000;

#[derive(Clone)]
pub struct ContactService {
    relay: FormRelayClient,
}

impl ContactService {
    pub fn new(relay: FormRelayClient) -> Self {
        Self { relay }
    }

    pub async fn send(&self, form: ContactForm) -> Result<(), AppError> {
        let form = validate(form)?;
        self.relay.submit(&form).await
    }
}

/// Trims every field and checks presence, length and email shape.
pub fn validate(form: ContactForm) -> Result<ContactForm, AppError> {
    let name = required("name", &form.name, MAX_NAME_LENGTH)?;
    let email = required("email", &form.email, MAX_EMAIL_LENGTH)?;
    let message = required("message", &form.message, MAX_MESSAGE_LENGTH)?;

    if !email.validate_email() {
        return Err(AppError::InvalidEmail { value: email });
    }

    Ok(ContactForm { name, email, message })
}

fn required(field_name: &str, value: &str, max_length: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::EmptyField { field_name: field_name.to_string() });
    }
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(AppError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length,
            actual_length,
        });
    }
    Ok(value.to_string())
}

use plain_params::{plain_params, Declaration, Params, ParamsError, Value};

/// Mailbox pattern accepted for `email`.
pub const EMAIL_PATTERN: &str = r"\A[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\z";

/// Ten or eleven digits, area code included.
pub const PHONE_PATTERN: &str = r"\A\d{10,11}\z";

plain_params! {
    /// Contact details with a formatted phone number and the mail domain.
    pub struct ContactParams {
        real: [name, email, phone],
        virtual: [
            formatted_phone = formatted_phone,
            email_domain = email_domain,
        ],
        validations: contact_validations,
    }
}

fn contact_validations(declaration: Declaration) -> Result<Declaration, ParamsError> {
    declaration
        .validates_format_of("email", EMAIL_PATTERN)?
        .validates_format_of("phone", PHONE_PATTERN)
}

/// `(11) 98765-4321` for eleven digits, `(11) 8765-4321` otherwise.
fn formatted_phone(params: &Params) -> Value {
    let Some(phone) = params.slot("phone").and_then(Value::as_str) else {
        return Value::Null;
    };
    let formatted = if phone.chars().count() == 11 {
        format!(
            "({}) {}-{}",
            segment(phone, 0, 2),
            segment(phone, 2, 7),
            segment(phone, 7, 11)
        )
    } else {
        format!(
            "({}) {}-{}",
            segment(phone, 0, 2),
            segment(phone, 2, 6),
            segment(phone, 6, 10)
        )
    };
    Value::from(formatted)
}

/// Everything after the last `@`, ignoring trailing empty parts.
fn email_domain(params: &Params) -> Value {
    params
        .slot("email")
        .and_then(Value::as_str)
        .and_then(|email| email.split('@').filter(|part| !part.is_empty()).last())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Characters `start..end`, clamped to the string.
fn segment(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

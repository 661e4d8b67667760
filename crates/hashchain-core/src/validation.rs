//! Structural validation of write arguments.
//!
//! The chain treats payload fields as opaque; the only check is that all
//! three are present.

use crate::error::ValidationError;
use crate::record::Payload;

/// Payload field names in canonical order.
pub const PAYLOAD_FIELDS: [&str; 3] = ["sender", "receiver", "amount"];

/// Build a payload from optional parts, failing on the first missing field.
pub fn validate_payload(
    sender: Option<String>,
    receiver: Option<String>,
    amount: Option<String>,
) -> Result<Payload, ValidationError> {
    let sender = sender.ok_or(ValidationError::MissingField(PAYLOAD_FIELDS[0]))?;
    let receiver = receiver.ok_or(ValidationError::MissingField(PAYLOAD_FIELDS[1]))?;
    let amount = amount.ok_or(ValidationError::MissingField(PAYLOAD_FIELDS[2]))?;
    Ok(Payload::new(sender, receiver, amount))
}

impl TryFrom<&[String]> for Payload {
    type Error = ValidationError;

    /// Arity check over positional arguments.
    fn try_from(args: &[String]) -> Result<Self, Self::Error> {
        match args {
            [sender, receiver, amount] => Ok(Payload::new(
                sender.clone(),
                receiver.clone(),
                amount.clone(),
            )),
            _ => Err(ValidationError::Arity {
                expected: PAYLOAD_FIELDS.len(),
                got: args.len(),
            }),
        }
    }
}

use crate::domain::validation::{ValidationError, Violations};

/// Immutable physical address owned by exactly one account. Validated on
/// construction; changing it means building a new value and handing it to
/// `UserAccount::replace_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    street: String,
    complement: Option<String>,
    neighborhood: String,
    postal_code: String,
    city: String,
    state: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        complement: Option<String>,
        neighborhood: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into().trim().to_owned(),
            complement: complement
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            neighborhood: neighborhood.into().trim().to_owned(),
            postal_code: postal_code.into().trim().to_owned(),
            city: city.into().trim().to_owned(),
            state: state.into().trim().to_owned(),
        };

        let mut violations = Violations::new();
        violations.require_non_blank("street", &address.street);
        violations.require_non_blank("neighborhood", &address.neighborhood);
        violations.require_non_blank("city", &address.city);
        violations.require_non_blank("state", &address.state);
        if address.postal_code.len() != 8
            || !address.postal_code.bytes().all(|b| b.is_ascii_digit())
        {
            violations.push("postal_code", "must be exactly 8 digits");
        }
        violations.finish()?;

        Ok(address)
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

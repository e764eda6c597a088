use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::domain::address::Address;
use crate::domain::role::Role;
use crate::domain::tax_id::TaxId;
use crate::domain::validation::{ValidationError, Violations};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Minimum age in whole years, as of "today". A birthday falling on today
/// counts as reached.
pub const MINIMUM_AGE: i32 = 18;

/// Validated user profile. Owns its address outright and references its
/// credential by id. Every mutation path revalidates before committing, so
/// an invalid account is never observable.
#[derive(Debug, Clone)]
pub struct UserAccount {
    id: Uuid,
    name: String,
    tax_id: TaxId,
    birth_date: NaiveDate,
    address: Address,
    email: String,
    role: Role,
    registered_at: DateTime<Utc>,
    credential_id: Option<Uuid>,
}

/// Replace-and-revalidate payload for profile updates. The tax id and the
/// registration timestamp are immutable.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub name: String,
    pub birth_date: NaiveDate,
    pub address: Address,
    pub email: String,
    pub role: Role,
}

impl UserAccount {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        tax_id: TaxId,
        birth_date: NaiveDate,
        address: Address,
        email: impl Into<String>,
        role: Role,
        credential_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let account = Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_owned(),
            tax_id,
            birth_date,
            address,
            email: email.into().trim().to_owned(),
            role,
            registered_at: now,
            credential_id,
        };
        account.validate(now.date_naive())?;
        Ok(account)
    }

    /// Rehydrate from a stored record, skipping validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_record(
        id: Uuid,
        name: String,
        tax_id: TaxId,
        birth_date: NaiveDate,
        address: Address,
        email: String,
        role: Role,
        registered_at: DateTime<Utc>,
        credential_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            name,
            tax_id,
            birth_date,
            address,
            email,
            role,
            registered_at,
            credential_id,
        }
    }

    /// Idempotent invariant check. `today` comes from the injected clock.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.require_non_blank("name", &self.name);
        violations.require_non_blank("email", &self.email);
        if !self.email.is_empty() {
            violations.require_match("email", &self.email, &EMAIL_PATTERN);
        }
        if age_on(self.birth_date, today) < MINIMUM_AGE {
            violations.push("birth_date", "account holder must be at least 18");
        }
        violations.finish()
    }

    /// Apply a profile update, committing only if the updated account still
    /// satisfies every invariant.
    pub fn apply_update(
        &mut self,
        update: AccountUpdate,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let mut candidate = self.clone();
        candidate.name = update.name.trim().to_owned();
        candidate.birth_date = update.birth_date;
        candidate.address = update.address;
        candidate.email = update.email.trim().to_owned();
        candidate.role = update.role;
        candidate.validate(today)?;
        *self = candidate;
        Ok(())
    }

    /// Swap in a new (already validated) address value.
    pub fn replace_address(&mut self, address: Address) {
        self.address = address;
    }

    pub fn attach_credential(&mut self, credential_id: Uuid) {
        self.credential_id = Some(credential_id);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn credential_id(&self) -> Option<Uuid> {
        self.credential_id
    }
}

fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Opaque identifier supplied by the authentication layer.
pub type UserId = Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records scoped to a single user.
pub trait Owned {
    fn user_id(&self) -> UserId;
}

/// Records positioned on the calendar.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Records carrying an exact monetary amount.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

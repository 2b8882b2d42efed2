pub mod composer;
pub mod dispatch;
pub mod events;
pub mod referral;
pub mod transport;

pub use composer::{ComposeError, ManualOfferRequest, NotificationDraft, OfferComposer};
pub use dispatch::{DispatchError, DispatchService};
pub use referral::{ClickTracker, ReferralLinkGenerator};
pub use transport::{EmailTransport, LoggingEmailTransport, OutboundEmail};

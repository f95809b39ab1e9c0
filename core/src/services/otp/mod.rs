//! One-time-passcode gateway interface.
//!
//! OTP generation, delivery, storage, and expiry are owned by an external
//! verification service; the core only asks it to dispatch a code and later
//! to check one. Implementations live in `lx_infra`.

pub mod mock;
mod traits;
mod types;

pub use mock::MockOtpGateway;
pub use traits::OtpGateway;
pub use types::{OtpCheckStatus, SendOtpResult};

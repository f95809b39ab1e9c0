//! OTP gateway implementations

pub mod twilio_verify;

pub use twilio_verify::{TwilioVerifyConfig, TwilioVerifyGateway};

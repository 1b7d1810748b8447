pub mod biometric;
mod dto;
mod services;

pub use dto::{Credential, OnboardingForm, SignInRequest, SignUpRequest};
pub use services::{
    complete_onboarding, set_biometric, sign_in, sign_in_with_biometric, sign_out, sign_up,
};

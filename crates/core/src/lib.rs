//! Fashion Assistant Core - Shared types library.
//!
//! This crate provides the domain model used by the `web` binary:
//! - user preferences and their partial-merge update
//! - the fixed answer sets of the onboarding survey
//! - the search request body and the product records it returns
//! - the onboarding survey state machine
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure state transitions -
//! no I/O, no HTTP clients. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Preferences, choices, search request and product records
//! - [`onboarding`] - The three-step onboarding survey

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod onboarding;
pub mod types;

pub use onboarding::{
    CompletionHook, OnboardingError, OnboardingFlow, OnboardingStep, PreferencesSink,
};
pub use types::*;

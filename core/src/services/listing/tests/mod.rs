//! Tests for the listing service

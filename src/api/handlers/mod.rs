// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod peer;
mod probe;
mod visits;

pub use health::health_check;
pub use peer::private_service_proxy;
pub use probe::test_connection;
pub use visits::{recent_visits, register_visit};

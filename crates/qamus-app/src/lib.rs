pub mod aggregator;
pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests {
    mod mocks;

    mod aggregator_tests;
    mod event_tests;
    mod profile_tests;
}

mod client;

pub use client::HttpIntakeClient;

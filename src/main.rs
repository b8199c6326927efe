mod audio;
mod config;
mod controller;
mod display;
mod error;
mod input;
mod library;
mod runtime;
mod token;

fn main() -> anyhow::Result<()> {
    runtime::run()
}

use clap::Parser;
use pexeso_core::Difficulty;
use wasm_bindgen::prelude::*;

mod bank;
mod contact;
mod game;
mod scores;
mod timers;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start on this difficulty instead of the saved one
    #[arg(short, long)]
    difficulty: Option<Difficulty>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let document = document();
    let mut mounted = 0;

    if let Some(root) = document.get_element_by_id("game") {
        let props = game::GameProps {
            seed: args.seed,
            difficulty: args.difficulty,
        };
        yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
        mounted += 1;
    }

    if let Some(root) = document.get_element_by_id("bank") {
        yew::Renderer::<bank::BankView>::with_root(root).render();
        mounted += 1;
    }

    if let Some(root) = document.get_element_by_id("contact") {
        yew::Renderer::<contact::ContactView>::with_root(root).render();
        mounted += 1;
    }

    if mounted == 0 {
        log::warn!("No id=\"game\", id=\"bank\" or id=\"contact\" element to mount into");
    } else {
        log::debug!("App started");
    }
}

use std::process::ExitCode;

use fetch_core::{Executor, Outcome};
use log::info;

const DEFAULT_GET_URL: &str = "http://httpbin.org/get";
const DEFAULT_POST_URL: &str = "http://httpbin.org/post";
const DEFAULT_POST_DATA: &str = "field1=value1&field2=value2";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn report(label: &str, outcome: Outcome) {
    match outcome {
        Ok(response) => println!("{label} Request Output: {}", response.text()),
        Err(e) => eprintln!("{label} request failed: {e}"),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let executor = match Executor::from_env() {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("executor init failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("chunk size {} bytes", executor.config().chunk_size);

    let get_url = env_or("FETCH_GET_URL", DEFAULT_GET_URL);
    let post_url = env_or("FETCH_POST_URL", DEFAULT_POST_URL);
    let post_data = env_or("FETCH_POST_DATA", DEFAULT_POST_DATA);

    report("GET", executor.get(&get_url));
    report("POST", executor.post(&post_url, &post_data));

    ExitCode::SUCCESS
}

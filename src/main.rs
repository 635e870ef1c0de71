use dism_wrapper::config::WrapperConfig;
use dism_wrapper::{app, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_tracing();

    let argv = collect_args(std::env::args_os());
    let config = WrapperConfig::default();
    let code = app::run(&argv, &config).await;

    std::process::exit(code);
}

/// Arguments that are not valid Unicode are converted lossily.
fn collect_args(args: impl IntoIterator<Item = std::ffi::OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

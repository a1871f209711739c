use clap::Parser;
use dpi_test_images::cli::Args;
use dpi_test_images::workflow;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // コマンドライン引数を解析します
    let args = Args::parse();

    if let Err(e) = workflow::run(args) {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use irrigation_design_core::{app, ui_cli::Cli};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 로깅을 초기화한 뒤 명령을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("irrigation_design_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = app::run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

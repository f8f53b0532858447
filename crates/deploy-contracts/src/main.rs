use {
    clap::Parser,
    deploy_contracts::arguments::Arguments,
    std::process::ExitCode,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Printing help or a usage error can only fail if stderr is gone.
            let _ = err.print();
            return ExitCode::from(deploy_contracts::usage_exit_status(&err));
        }
    };

    let mut log_config = observe::Config::default().with_env_filter(&args.log_filter);
    if args.log_json {
        log_config = log_config.with_json_format();
    }
    observe::tracing::initialize(&log_config);
    tracing::info!("running deploy-contracts with validated arguments:\n{}", args);

    let result = deploy_contracts::run(args, &mut std::io::stdout()).await;
    ExitCode::from(deploy_contracts::exit_status(&result, &mut std::io::stderr()))
}

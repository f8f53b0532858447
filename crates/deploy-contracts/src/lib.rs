pub mod arguments;
pub mod artifact;
pub mod deployer;
pub mod factory;

use {
    crate::{
        arguments::Arguments,
        artifact::Artifacts,
        deployer::{Chain, Deployment, NodeChain},
    },
    anyhow::{Context, Result},
    number::units,
    std::io::Write,
};

/// Deploys the configured contract with the configured listing fee as its
/// constructor argument.
pub async fn run(args: Arguments, out: &mut dyn Write) -> Result<Deployment> {
    let signer = args
        .account_source()
        .signer()
        .context("failed to load deployer account")?;
    let account = signer.address();
    let provider = ethrpc::alloy::provider_with_signer(&args.node_url, signer);
    let chain = NodeChain::new(provider, account, args.confirmations);

    let chain_id = chain.chain_id().await?;
    tracing::info!(chain_id, ?account, "connected to network");

    let listing_fee = units::parse_units(&args.listing_fee, args.listing_fee_decimals)
        .with_context(|| format!("invalid listing fee {:?}", args.listing_fee))?;
    tracing::info!(
        fee = %units::format_units(listing_fee, args.listing_fee_decimals),
        %listing_fee,
        "listing fee"
    );

    deployer::deploy(
        &chain,
        &Artifacts::new(&args.artifacts),
        &args.contract,
        &[factory::listing_fee_argument(listing_fee)],
        out,
    )
    .await
}

/// Process exit status of a finished run. A failure is logged and written to
/// `stderr` together with its context chain.
pub fn exit_status(result: &Result<Deployment>, stderr: &mut dyn Write) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            tracing::error!(?err, "deployment failed");
            // Nobody is left to tell if stderr itself is broken.
            let _ = writeln!(stderr, "Error: {err:?}");
            1
        }
    }
}

/// Exit status for arguments clap refused. `--help` and `--version` are
/// successful runs, everything else is a failure like any other.
pub fn usage_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use {super::*, anyhow::anyhow, clap::Parser};

    #[tokio::test]
    async fn unreachable_node_fails_before_any_output() {
        let args = Arguments::try_parse_from([
            "deploy-contracts",
            "--node-url",
            "http://127.0.0.1:1",
        ])
        .unwrap();

        let mut out = Vec::new();
        assert!(run(args, &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn invalid_account_fails_before_any_output() {
        let args = Arguments::try_parse_from([
            "deploy-contracts",
            "--mnemonic",
            "definitely not a mnemonic",
        ])
        .unwrap();

        let mut out = Vec::new();
        let err = run(args, &mut out).await.unwrap_err();
        assert!(err.to_string().contains("deployer account"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn malformed_private_key_fails_before_any_output() {
        let args = Arguments::try_parse_from(["deploy-contracts", "--private-key", "0x1234"])
            .unwrap();

        let mut out = Vec::new();
        let result = run(args, &mut out).await;
        assert!(out.is_empty());

        let mut stderr = Vec::new();
        assert_eq!(exit_status(&result, &mut stderr), 1);
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.starts_with("Error: failed to load deployer account"));
        assert!(stderr.contains("invalid private key"));
    }

    #[test]
    fn failures_exit_with_one_and_report_the_error() {
        let result = Err(anyhow!("contract reverted").context("failed to deploy NFTMarketplace"));
        let mut stderr = Vec::new();

        assert_eq!(exit_status(&result, &mut stderr), 1);
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.contains("failed to deploy NFTMarketplace"));
        assert!(stderr.contains("contract reverted"));
    }

    #[test]
    fn success_exits_with_zero_and_stays_silent() {
        let result = Ok(Deployment {
            address: Default::default(),
            transaction_hash: Default::default(),
            block_number: Some(1),
            gas_used: 21_000,
        });
        let mut stderr = Vec::new();

        assert_eq!(exit_status(&result, &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn rejected_arguments_exit_with_one() {
        let err = Arguments::try_parse_from(["deploy-contracts", "--node-url", "not a url"])
            .err()
            .unwrap();
        assert_eq!(usage_exit_status(&err), 1);

        let err = Arguments::try_parse_from(["deploy-contracts", "--confirmations", "-1"])
            .err()
            .unwrap();
        assert_eq!(usage_exit_status(&err), 1);

        let help = Arguments::try_parse_from(["deploy-contracts", "--help"])
            .err()
            .unwrap();
        assert_eq!(usage_exit_status(&help), 0);
    }
}

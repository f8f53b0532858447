use {
    clap::Parser,
    ethrpc::alloy::{AccountSource, wallet::DEV_MNEMONIC},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    url::Url,
};

/// Deploys a compiled contract and prints the deployer and contract
/// addresses.
#[derive(Parser)]
#[clap(name = "deploy-contracts")]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key of the deployer account.
    #[clap(long, env, conflicts_with = "mnemonic", hide_env_values = true)]
    pub private_key: Option<String>,

    /// BIP-39 mnemonic the deployer account is derived from. Defaults to the
    /// mnemonic whose accounts local development nodes fund.
    #[clap(long, env, default_value = DEV_MNEMONIC, hide_default_value = true)]
    pub mnemonic: String,

    /// Index of the deployer account on the mnemonic's derivation path.
    #[clap(long, env, default_value = "0")]
    pub account_index: u32,

    /// Directory with the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Name or fully qualified name (`path/File.sol:Name`) of the contract to
    /// deploy.
    #[clap(long, env, default_value = "NFTMarketplace")]
    pub contract: String,

    /// Listing fee passed to the constructor, as a decimal amount of the
    /// native token.
    #[clap(long, env, default_value = "0.01")]
    pub listing_fee: String,

    /// Decimals used to convert the listing fee into its on-chain integer
    /// representation.
    #[clap(long, env, default_value = "18")]
    pub listing_fee_decimals: u8,

    /// Number of confirmations to wait for after the deployment transaction
    /// got mined.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,

    #[clap(long, env, default_value = "warn,deploy_contracts=info,ethrpc=info")]
    pub log_filter: String,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub log_json: bool,
}

impl Arguments {
    pub fn account_source(&self) -> AccountSource {
        match &self.private_key {
            Some(key) => AccountSource::PrivateKey(key.clone()),
            None => AccountSource::Mnemonic {
                phrase: self.mnemonic.clone(),
                index: self.account_index,
            },
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            node_url,
            private_key: _,
            mnemonic: _,
            account_index: _,
            artifacts,
            contract,
            listing_fee,
            listing_fee_decimals,
            confirmations,
            log_filter,
            log_json,
        } = self;

        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "account: {}", self.account_source())?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contract: {contract}")?;
        writeln!(f, "listing_fee: {listing_fee}")?;
        writeln!(f, "listing_fee_decimals: {listing_fee_decimals}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_json: {log_json}")?;
        Ok(())
    }
}

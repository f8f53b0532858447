use {
    crate::{artifact::Artifacts, factory::ContractFactory},
    alloy::{
        dyn_abi::DynSolValue,
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, B256, Bytes},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
    anyhow::{Context, Result, ensure},
    ethrpc::AlloyProvider,
    std::io::Write,
};

/// A confirmed contract deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// The network contracts get deployed to.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Account that signs and pays for deployments.
    fn deployer(&self) -> Address;

    async fn chain_id(&self) -> Result<u64>;

    /// Sends a create transaction with `code` as its input and waits until
    /// it is confirmed. Fails if the transaction reverted.
    async fn deploy(&self, code: Bytes) -> Result<Deployment>;
}

pub struct NodeChain {
    provider: AlloyProvider,
    deployer: Address,
    confirmations: u64,
}

impl NodeChain {
    pub fn new(provider: AlloyProvider, deployer: Address, confirmations: u64) -> Self {
        Self {
            provider,
            deployer,
            confirmations,
        }
    }
}

#[async_trait::async_trait]
impl Chain for NodeChain {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("could not fetch current chain id")
    }

    async fn deploy(&self, code: Bytes) -> Result<Deployment> {
        let tx = TransactionRequest::default()
            .from(self.deployer)
            .with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("failed to submit deployment transaction")?;
        let transaction_hash = *pending.tx_hash();
        tracing::info!(
            ?transaction_hash,
            confirmations = self.confirmations,
            "submitted deployment transaction"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .with_context(|| format!("failed to confirm transaction {transaction_hash}"))?;
        deployment_from_receipt(&receipt)
    }
}

fn deployment_from_receipt(receipt: &TransactionReceipt) -> Result<Deployment> {
    let transaction_hash = receipt.transaction_hash;
    ensure!(
        ReceiptResponse::status(receipt),
        "deployment transaction {transaction_hash} reverted"
    );
    let address = receipt
        .contract_address
        .with_context(|| format!("receipt of {transaction_hash} has no contract address"))?;

    Ok(Deployment {
        address,
        transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

/// Deploys contract `name` from `artifacts` with the constructor arguments
/// `args` and reports the deployer and the new contract address on `out`,
/// one line each.
pub async fn deploy(
    chain: &dyn Chain,
    artifacts: &Artifacts,
    name: &str,
    args: &[DynSolValue],
    out: &mut dyn Write,
) -> Result<Deployment> {
    let deployer = chain.deployer();
    writeln!(out, "Deploying contracts with the account: {deployer}")?;

    let artifact = artifacts.find(name)?;
    let factory = ContractFactory::new(artifact)?;
    let code = factory.deploy_code(args)?;
    tracing::debug!(contract = factory.name(), len = code.len(), "encoded deployment");

    let deployment = chain
        .deploy(code)
        .await
        .with_context(|| format!("failed to deploy {}", factory.name()))?;
    tracing::info!(
        contract = factory.name(),
        address = %deployment.address,
        transaction = %deployment.transaction_hash,
        block = ?deployment.block_number,
        gas_used = deployment.gas_used,
        "contract deployed"
    );

    writeln!(out, "{} deployed to: {}", factory.name(), deployment.address)?;
    Ok(deployment)
}

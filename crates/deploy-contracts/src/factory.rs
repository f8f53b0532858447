use {
    crate::artifact::Artifact,
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        json_abi::JsonAbi,
        primitives::{Bytes, U256},
    },
    anyhow::{Context, Result, ensure},
};

/// Builds the payload of create transactions for one compiled contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    creation_code: Bytes,
}

impl ContractFactory {
    pub fn new(artifact: Artifact) -> Result<Self> {
        let creation_code = artifact.creation_code()?;
        Ok(Self {
            name: artifact.contract_name,
            abi: artifact.abi,
            creation_code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation code followed by the ABI encoded constructor arguments. The
    /// arguments are type checked against the constructor in the ABI.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(args)
                .with_context(|| format!("invalid constructor arguments for {}", self.name))?,
            None => {
                ensure!(
                    args.is_empty(),
                    "{} has no constructor but {} arguments were given",
                    self.name,
                    args.len()
                );
                Vec::new()
            }
        };
        Ok([&self.creation_code[..], &encoded_args[..]].concat().into())
    }
}

/// Constructor argument carrying the marketplace listing fee.
pub fn listing_fee_argument(fee: U256) -> DynSolValue {
    DynSolValue::Uint(fee, 256)
}

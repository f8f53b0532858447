use {
    alloy::{
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
    std::fmt::{self, Display, Formatter},
};

/// Mnemonic whose accounts local development nodes (hardhat, anvil) fund at
/// genesis.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Where the account signing transactions comes from.
#[derive(Clone)]
pub enum AccountSource {
    /// Hex encoded private key, decoded when the signer is requested.
    PrivateKey(String),
    /// Account `index` on the default derivation path `m/44'/60'/0'/0/{index}`.
    Mnemonic { phrase: String, index: u32 },
}

impl AccountSource {
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        match self {
            Self::PrivateKey(key) => key
                .trim()
                .parse()
                .context("invalid private key"),
            Self::Mnemonic { phrase, index } => MnemonicBuilder::<English>::default()
                .phrase(phrase.as_str())
                .index(*index)
                .with_context(|| format!("invalid derivation index {index}"))?
                .build()
                .context("failed to derive account from mnemonic"),
        }
    }

    pub fn address(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }
}

impl Default for AccountSource {
    fn default() -> Self {
        Self::Mnemonic {
            phrase: DEV_MNEMONIC.to_string(),
            index: 0,
        }
    }
}

// Never print key material.
impl Display for AccountSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey(key) => match key.trim().parse::<PrivateKeySigner>() {
                Ok(signer) => write!(f, "private key of {}", signer.address()),
                Err(_) => f.write_str("invalid private key"),
            },
            Self::Mnemonic { phrase, index } if phrase == DEV_MNEMONIC => {
                write!(f, "development mnemonic account #{index}")
            }
            Self::Mnemonic { index, .. } => write!(f, "mnemonic account #{index}"),
        }
    }
}

impl fmt::Debug for AccountSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    const DEV_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn default_source_is_first_development_account() {
        assert_eq!(
            AccountSource::default().address().unwrap(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
        );
    }

    #[test]
    fn mnemonic_index_selects_account() {
        let source = AccountSource::Mnemonic {
            phrase: DEV_MNEMONIC.to_string(),
            index: 1,
        };
        assert_eq!(
            source.address().unwrap(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        );
    }

    #[test]
    fn private_key_and_mnemonic_agree() {
        let source = AccountSource::PrivateKey(DEV_KEY_0.to_string());
        assert_eq!(
            source.address().unwrap(),
            AccountSource::default().address().unwrap()
        );
    }

    #[test]
    fn invalid_mnemonic_is_an_error() {
        let source = AccountSource::Mnemonic {
            phrase: "not a valid phrase".to_string(),
            index: 0,
        };
        assert!(source.signer().is_err());
    }

    #[test]
    fn malformed_private_key_is_an_error() {
        for key in ["0x1234", "not hex", ""] {
            let source = AccountSource::PrivateKey(key.to_string());
            let err = source.signer().unwrap_err();
            assert!(err.to_string().contains("invalid private key"));
            assert_eq!(source.to_string(), "invalid private key");
        }
    }

    #[test]
    fn display_hides_secrets() {
        let source = AccountSource::PrivateKey(DEV_KEY_0.to_string());
        let shown = source.to_string();
        assert!(!shown.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
        assert_eq!(
            AccountSource::default().to_string(),
            "development mnemonic account #0"
        );
    }
}

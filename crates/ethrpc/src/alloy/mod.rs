mod instrumentation;
pub mod wallet;

pub use wallet::AccountSource;
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Creates a provider that signs every transaction it sends with `signer`.
/// Nonce, gas and chain id of outgoing transactions are filled in by the
/// provider.
pub fn provider_with_signer(url: &Url, signer: PrivateKeySigner) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer)
        .http(url.clone());
    ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect_client(rpc)
        .erased()
}

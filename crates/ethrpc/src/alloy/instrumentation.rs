//! Transport layer that logs every RPC call going to the node together with
//! how long the node took to answer it.
use {
    alloy::{
        rpc::json_rpc::{RequestPacket, ResponsePacket},
        transports::TransportError,
    },
    std::{
        fmt::Debug,
        pin::Pin,
        task::{Context, Poll},
        time::Instant,
    },
    tower::{Layer, Service},
};

pub(crate) struct InstrumentationLayer;

impl<S> Layer<S> for InstrumentationLayer {
    type Service = InstrumentedProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedProvider { inner }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InstrumentedProvider<S> {
    inner: S,
}

impl<S> Service<RequestPacket> for InstrumentedProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: RequestPacket) -> Self::Future {
        let methods: Vec<String> = req
            .requests_mut()
            .iter_mut()
            .map(|r| {
                tracing::trace!(?r, "executing request");
                r.method().to_owned()
            })
            .collect();

        let start = Instant::now();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await;
            let elapsed = start.elapsed();
            match &res {
                Ok(_) => tracing::debug!(?methods, ?elapsed, "rpc request completed"),
                Err(err) => tracing::debug!(?methods, ?elapsed, ?err, "rpc request failed"),
            }
            res
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            providers::{Provider, ProviderBuilder},
            rpc::client::ClientBuilder,
            transports::mock::{Asserter, MockTransport},
        },
    };

    #[tokio::test]
    async fn forwards_responses_of_inner_transport() {
        let asserter = Asserter::new();
        asserter.push_success(&"0x7a69");
        let rpc = ClientBuilder::default()
            .layer(InstrumentationLayer)
            .transport(MockTransport::new(asserter.clone()), true);
        let provider = ProviderBuilder::new().connect_client(rpc);

        assert_eq!(provider.get_chain_id().await.unwrap(), 31337);
    }

    #[tokio::test]
    async fn forwards_errors_of_inner_transport() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("node is syncing");
        let rpc = ClientBuilder::default()
            .layer(InstrumentationLayer)
            .transport(MockTransport::new(asserter.clone()), true);
        let provider = ProviderBuilder::new().connect_client(rpc);

        assert!(provider.get_chain_id().await.is_err());
    }
}

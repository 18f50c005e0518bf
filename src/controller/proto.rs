//! Wire types and client for the `nsc.NSCService` gRPC service.
//!
//! ```text
//! service NSCService {
//!   rpc DiscoverServer(ClientNode) returns (ServerInfo);
//!   rpc ProcessPod(PodRequest) returns (PodResponse);
//! }
//! ```
//!
//! Only the fields this sidecar reads or writes are declared; unknown fields
//! in responses are skipped by the decoder.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

const SERVICE: &str = "nsc.NSCService";

/// Discovery request: which node the pod runs on.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientNode {
    #[prost(string, tag = "1")]
    pub node_name: ::prost::alloc::string::String,
}

/// Discovery response: controller instance that should handle the pod.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerInfo {
    #[prost(string, tag = "1")]
    pub server_ip: ::prost::alloc::string::String,
}

/// Registration request for one pod.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PodRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub namespace: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub node_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub network_service: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub inode_url: ::prost::alloc::string::String,
    #[prost(int32, tag = "6")]
    pub retry_count: i32,
}

/// Registration acknowledgement.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PodResponse {}

/// Client for `nsc.NSCService` over a tonic [`Channel`].
#[derive(Debug, Clone)]
pub struct NscServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl NscServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn discover_server(
        &mut self,
        request: impl tonic::IntoRequest<ClientNode>,
    ) -> Result<tonic::Response<ServerInfo>, tonic::Status> {
        self.ready().await?;
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(tonic::GrpcMethod::new(SERVICE, "DiscoverServer"));
        let path = PathAndQuery::from_static("/nsc.NSCService/DiscoverServer");
        self.inner
            .unary(req, path, tonic::codec::ProstCodec::default())
            .await
    }

    pub async fn process_pod(
        &mut self,
        request: impl tonic::IntoRequest<PodRequest>,
    ) -> Result<tonic::Response<PodResponse>, tonic::Status> {
        self.ready().await?;
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(tonic::GrpcMethod::new(SERVICE, "ProcessPod"));
        let path = PathAndQuery::from_static("/nsc.NSCService/ProcessPod");
        self.inner
            .unary(req, path, tonic::codec::ProstCodec::default())
            .await
    }

    async fn ready(&mut self) -> Result<(), tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service was not ready: {e}")))
    }
}

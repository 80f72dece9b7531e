use crate::state::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use ethscope_config::Network;
use ethscope_core::{AlchemyClient, EtherscanClient, Explorer};
use serde_json::{Value, json};
use wiremock::matchers::{any, body_partial_json, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// 2.5 ETH in wei
pub const TEST_BALANCE_HEX: &str = "0x22b1c8c1227a0000";

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0", "id": 1, "result": result
    }))
}

/// Builds blocks and transactions from the requested number or hash.
struct ChainResponder {
    txs_per_block: usize,
}

impl Respond for ChainResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let param = body["params"][0].as_str().unwrap_or_default().to_string();
        match body["method"].as_str().unwrap_or_default() {
            "eth_getBlockByNumber" => {
                let number = u64::from_str_radix(&param[2..], 16).unwrap();
                let txs: Vec<String> = (0..self.txs_per_block)
                    .map(|i| format!("0x{:064x}", i))
                    .collect();
                rpc_result(json!({
                    "number": param,
                    "hash": format!("0x{:064x}", number + 1),
                    "parentHash": format!("0x{:064x}", number),
                    "timestamp": "0x6553f100",
                    "miner": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
                    "nonce": "0x0000000000000000",
                    "gasUsed": "0x1c9c380",
                    "gasLimit": "0x1c9c380",
                    "baseFeePerGas": "0x3b9aca00",
                    "transactions": txs,
                }))
            }
            "eth_getTransactionByHash" => rpc_result(json!({
                "hash": param,
                "blockHash": format!("0x{:064x}", 101),
                "blockNumber": "0x64",
                "transactionIndex": "0x0",
                "from": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
                "to": "0x388c818ca8b9251b393131c08a736a67ccb19297",
                "value": "0xde0b6b3a7640000",
                "gas": "0x5208",
                "gasPrice": "0x3b9aca00",
                "nonce": "0x1",
                "input": "0x"
            })),
            "eth_getBalance" => rpc_result(json!(TEST_BALANCE_HEX)),
            _ => ResponseTemplate::new(400),
        }
    }
}

/// Fake provider endpoints backed by a wiremock server.
pub struct TestChain {
    pub server: MockServer,
}

impl TestChain {
    pub async fn start(latest: u64, txs_per_block: usize) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
            .respond_with(rpc_result(json!(format!("0x{:x}", latest))))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ChainResponder { txs_per_block })
            .with_priority(10)
            .mount(&server)
            .await;
        TestChain { server }
    }

    /// Every provider request fails with 500.
    pub async fn failing() -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        TestChain { server }
    }

    pub fn data(&self) -> web::Data<AppState> {
        let uri = self.server.uri();
        let explorer = Explorer::new(
            AlchemyClient::new(&uri, &format!("{}/nft", uri)),
            EtherscanClient::new(&format!("{}/api", uri), "test-key"),
        );
        web::Data::new(AppState::new(explorer, Network::Mainnet))
    }
}

macro_rules! init_app {
    ($chain:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($chain.data())
                .configure(crate::routes::configure),
        )
        .await
    };
}
pub(crate) use init_app;

pub async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).unwrap()
}

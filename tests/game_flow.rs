//! End-to-end flows against a node that emulates the Game and temp-key contracts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::consensus::Transaction;
use alloy::primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolCall, SolInterface, SolValue};
use serde_json::{json, Value};
use tempkey_client::contracts::game::Game::GameCalls;
use tempkey_client::contracts::temp_key::TempPrivateKey::TempPrivateKeyCalls;
use tempkey_client::contracts::{game, Game};
use tempkey_client::GameClient;

mod common;

const TEMP_KEY_CONTRACT: Address = address!("1000000000000000000000000000000000000021");
const GAME_CONTRACT: Address = address!("3a9d4C411F8A37be2f34B208A03719a2cCf4Aee0");

/// One decoded transaction as seen by the node.
#[derive(Debug, Clone)]
struct Sent {
    from: Address,
    to: Address,
    input: Bytes,
}

#[derive(Default)]
struct ChainState {
    issuer: Address,
    line_of_credit: U256,
    position: U256,
    sent: Vec<Sent>,
    receipts: HashMap<TxHash, Value>,
}

impl ChainState {
    fn apply_game_call(&mut self, input: &[u8]) {
        match GameCalls::abi_decode(input) {
            Ok(GameCalls::setIssuer(call)) => self.issuer = call.newIssuer,
            Ok(GameCalls::setLineOfCredit(call)) => self.line_of_credit = call.amount,
            Ok(GameCalls::movePlayer(call)) => self.position += call.steps,
            _ => {}
        }
    }

    fn apply(&mut self, sent: &Sent) {
        if sent.to == GAME_CONTRACT {
            self.apply_game_call(&sent.input);
        } else if sent.to == TEMP_KEY_CONTRACT {
            if let Ok(TempPrivateKeyCalls::behalfSignature(call)) =
                TempPrivateKeyCalls::abi_decode(&sent.input)
            {
                self.apply_game_call(&call.input);
            }
        }
    }

    fn eth_call(&self, input: &[u8]) -> Result<Bytes, String> {
        let out = match GameCalls::abi_decode(input) {
            Ok(GameCalls::issuer(_)) => self.issuer.abi_encode(),
            Ok(GameCalls::lineOfCredit(_)) => self.line_of_credit.abi_encode(),
            Ok(GameCalls::position(_)) => self.position.abi_encode(),
            _ => return Err("execution reverted".to_string()),
        };
        Ok(out.into())
    }
}

async fn start_game_node() -> (common::MockNode, Arc<Mutex<ChainState>>) {
    let state = Arc::new(Mutex::new(ChainState::default()));
    let chain = state.clone();

    let node = common::start_rpc_node(move |method, params| {
        let mut chain = chain.lock().unwrap();
        match method {
            "eth_getTransactionCount" => Ok(json!(format!("0x{:x}", chain.sent.len()))),
            "eth_chainId" => Ok(json!("0x539")),
            "eth_gasPrice" => Ok(json!("0x3b9aca00")),
            "eth_blockNumber" => Ok(json!("0x1")),
            "eth_sendRawTransaction" => {
                let (envelope, raw) = common::decode_raw_tx(params);
                let legacy = envelope.as_legacy().ok_or("legacy transactions only")?;
                let sent = Sent {
                    from: legacy.recover_signer().map_err(|e| e.to_string())?,
                    to: envelope.to().ok_or("contract creation not supported")?,
                    input: envelope.input().clone(),
                };
                let tx_hash = keccak256(&raw);
                chain.apply(&sent);
                chain
                    .receipts
                    .insert(tx_hash, common::receipt_json(tx_hash, sent.from, sent.to, 1));
                chain.sent.push(sent);
                Ok(json!(tx_hash))
            }
            "eth_getTransactionReceipt" => {
                let tx_hash: TxHash = serde_json::from_value(params[0].clone()).map_err(|e| e.to_string())?;
                Ok(chain.receipts.get(&tx_hash).cloned().unwrap_or(Value::Null))
            }
            "eth_call" => {
                let request = &params[0];
                let input = request.get("input").or_else(|| request.get("data")).cloned();
                let input: Bytes = serde_json::from_value(input.unwrap_or(Value::Null)).map_err(|e| e.to_string())?;
                chain.eth_call(&input).map(|out| json!(out))
            }
            other => Err(format!("unexpected method {}", other)),
        }
    })
    .await;

    (node, state)
}

fn game_client(node: &common::MockNode) -> GameClient {
    let config = common::test_config(&node.url());
    GameClient::from_config(&config, common::test_keys()).unwrap()
}

#[tokio::test]
async fn test_set_issuer_then_read_back() {
    let (node, _) = start_game_node().await;
    let client = game_client(&node);
    let issuer = address!("00000000000000000000000000000000deadbeef");

    let tx_hash = client.set_issuer(issuer).await.unwrap();
    let receipt = client.wait_for_receipt(tx_hash).await.unwrap();

    assert_eq!(receipt.transaction_hash, tx_hash);
    assert_eq!(client.issuer().await.unwrap(), issuer);
}

#[tokio::test]
async fn test_game_info_walkthrough() {
    let (node, state) = start_game_node().await;
    let client = game_client(&node);
    let work = client.keys().work.address();

    let report = client
        .game_info(U256::from(1_234_567_890u64), U256::from(12345u64))
        .await
        .unwrap();

    assert_eq!(report.issuer.value, work);
    assert_eq!(report.line_of_credit.value, U256::from(1_234_567_890u64));
    assert_eq!(report.position.value, U256::from(12345u64));
    assert_eq!(report.position.block_number, Some(1));

    let state = state.lock().unwrap();
    assert_eq!(state.sent.len(), 3);
    assert!(state.sent.iter().all(|s| s.from == work && s.to == GAME_CONTRACT));
}

#[tokio::test]
async fn test_game_info_stops_at_first_failure() {
    let node = common::start_rpc_node(|method, _| match method {
        "eth_getTransactionCount" => Ok(json!("0x0")),
        "eth_chainId" => Ok(json!("0x539")),
        "eth_gasPrice" => Ok(json!("0x1")),
        "eth_sendRawTransaction" => Err("nonce too low".to_string()),
        other => Err(format!("unexpected method {}", other)),
    })
    .await;
    let client = game_client(&node);

    let result = client
        .game_info(U256::from(1u64), U256::from(1u64))
        .await;

    assert!(result.is_err());
    assert_eq!(node.count("eth_sendRawTransaction"), 1);
    assert_eq!(node.count("eth_call"), 0);
}

#[tokio::test]
async fn test_temp_key_operations_use_the_right_keys() {
    let (node, state) = start_game_node().await;
    let client = game_client(&node);
    let keys = client.keys().clone();
    let period = b"Hello World";

    client.bind_temp_key(period).await.unwrap();
    client
        .sign_on_behalf(period, game::move_player(U256::from(7u64)))
        .await
        .unwrap();
    client.add_line_of_credit(U256::from(1000u64)).await.unwrap();
    client.invalidate_temp_key().await.unwrap();

    let state = state.lock().unwrap();
    let signers: Vec<_> = state.sent.iter().map(|s| s.from).collect();
    assert_eq!(
        signers,
        vec![
            keys.work.address(),
            keys.temporary.address(),
            keys.operator.address(),
            keys.work.address(),
        ]
    );
    assert!(state.sent.iter().all(|s| s.to == TEMP_KEY_CONTRACT));

    match TempPrivateKeyCalls::abi_decode(&state.sent[0].input).unwrap() {
        TempPrivateKeyCalls::bindTempPrivateKey(call) => {
            assert_eq!(call.gameContract, GAME_CONTRACT);
            assert_eq!(call.tempAddress, keys.temporary.address());
            assert_eq!(call.period.as_ref(), period);
        }
        other => panic!("unexpected call {:?}", other),
    }
    match TempPrivateKeyCalls::abi_decode(&state.sent[2].input).unwrap() {
        TempPrivateKeyCalls::addLineOfCredit(call) => {
            assert_eq!(call.workAddress, keys.work.address());
            assert_eq!(call.addValue, U256::from(1000u64));
        }
        other => panic!("unexpected call {:?}", other),
    }

    // The behalf call moved the player.
    assert_eq!(state.position, U256::from(7u64));
}

#[tokio::test]
async fn test_query_state() {
    let (node, state) = start_game_node().await;
    {
        let mut state = state.lock().unwrap();
        state.issuer = address!("00000000000000000000000000000000000000aa");
        state.line_of_credit = U256::from(5u64);
        state.position = U256::from(9u64);
    }
    let client = game_client(&node);

    let snapshot = client.query_state().await.unwrap();
    assert_eq!(snapshot.issuer, address!("00000000000000000000000000000000000000aa"));
    assert_eq!(snapshot.line_of_credit, U256::from(5u64));
    assert_eq!(snapshot.position, U256::from(9u64));

    let json = serde_json::to_value(snapshot).unwrap();
    assert!(json.get("lineOfCredit").is_some());
}

#[tokio::test]
async fn test_unknown_getter_reverts() {
    let (node, _) = start_game_node().await;
    let client = game_client(&node);

    let err = client
        .submitter()
        .client()
        .call(GAME_CONTRACT, Game::setIssuerCall { newIssuer: Address::ZERO }.abi_encode().into())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("execution reverted"));
}

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdError, StdResult, Storage,
    WasmMsg,
};
use minesweeper::{CapabilityError, EncryptionCapability, RequestHandle};
use prost::Message;

use crate::msg::GatewayExecuteMsg;
use crate::state::REQUEST_COUNTER;

pub const ENCRYPT_BOOL_PATH: &str = "/fhe.v1.Query/EncryptBool";
pub const ENCRYPT_U8_PATH: &str = "/fhe.v1.Query/EncryptU8";
pub const RANDOM_U8_PATH: &str = "/fhe.v1.Query/RandomU8";
pub const EQ_PATH: &str = "/fhe.v1.Query/Eq";
pub const SELECT_PATH: &str = "/fhe.v1.Query/Select";

#[derive(Clone, PartialEq, Message)]
pub struct EncryptBoolRequest {
    #[prost(bool, tag = "1")]
    pub value: bool,
}

#[derive(Clone, PartialEq, Message)]
pub struct EncryptU8Request {
    #[prost(uint32, tag = "1")]
    pub value: u32,
}

/// Encrypted uniform integer in `0..bound`, generated inside the coprocessor
#[derive(Clone, PartialEq, Message)]
pub struct RandomU8Request {
    #[prost(uint32, tag = "1")]
    pub bound: u32,
    /// Domain separation: player, game number and block height
    #[prost(string, tag = "2")]
    pub domain: String,
    /// Draw number within the domain
    #[prost(uint64, tag = "3")]
    pub nonce: u64,
}

#[derive(Clone, PartialEq, Message)]
pub struct EqRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub lhs: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub rhs: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SelectRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub condition: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub if_true: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub if_false: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct CiphertextResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub handle: Vec<u8>,
}

fn query_fhe<Req: Message>(
    querier: &QuerierWrapper,
    path: &str,
    request: &Req,
) -> StdResult<Binary> {
    let response = querier.query_grpc(path.to_string(), Binary::new(request.encode_to_vec()))?;
    let response = CiphertextResponse::decode(response.as_slice())
        .map_err(|e| StdError::msg(format!("{path}: {e}")))?;
    Ok(Binary::new(response.handle))
}

/// Encryption capability backed by the chain's FHE module (gRPC queries) and the decryption
/// gateway contract (dispatched messages).
///
/// Decryption requests are numbered from `REQUEST_COUNTER` and queued as `WasmMsg`s; the
/// caller must attach [`FheBridge::into_messages`] to its response. Encrypted randomness is
/// only available once a domain is set with [`FheBridge::with_random_domain`].
pub struct FheBridge<'a> {
    querier: QuerierWrapper<'a>,
    storage: &'a mut dyn Storage,
    gateway: Addr,
    random_domain: Option<String>,
    draws: u64,
    messages: Vec<CosmosMsg>,
}

impl<'a> FheBridge<'a> {
    pub fn new(querier: QuerierWrapper<'a>, storage: &'a mut dyn Storage, gateway: Addr) -> Self {
        Self {
            querier,
            storage,
            gateway,
            random_domain: None,
            draws: 0,
            messages: vec![],
        }
    }

    pub fn with_random_domain(mut self, domain: String) -> Self {
        self.random_domain = Some(domain);
        self
    }

    pub fn into_messages(self) -> Vec<CosmosMsg> {
        self.messages
    }

    fn next_request_id(&mut self) -> StdResult<u64> {
        let request_id = REQUEST_COUNTER.may_load(self.storage)?.unwrap_or_default() + 1;
        REQUEST_COUNTER.save(self.storage, &request_id)?;
        Ok(request_id)
    }

    fn query<Req: Message>(&self, path: &str, request: &Req) -> Result<Binary, CapabilityError> {
        query_fhe(&self.querier, path, request).map_err(capability_error)
    }
}

fn capability_error(e: StdError) -> CapabilityError {
    CapabilityError::new(e.to_string())
}

impl EncryptionCapability for FheBridge<'_> {
    type Ciphertext = Binary;

    fn encrypt(&mut self, value: bool) -> Result<Binary, CapabilityError> {
        self.query(ENCRYPT_BOOL_PATH, &EncryptBoolRequest { value })
    }

    fn encrypt_u8(&mut self, value: u8) -> Result<Binary, CapabilityError> {
        self.query(
            ENCRYPT_U8_PATH,
            &EncryptU8Request {
                value: value.into(),
            },
        )
    }

    fn random_below(&mut self, bound: u8) -> Result<Binary, CapabilityError> {
        let domain = self
            .random_domain
            .clone()
            .ok_or_else(|| CapabilityError::new("no randomness domain set"))?;
        let request = RandomU8Request {
            bound: bound.into(),
            domain,
            nonce: self.draws,
        };
        let handle = self.query(RANDOM_U8_PATH, &request)?;
        self.draws += 1;
        Ok(handle)
    }

    fn encrypted_eq(&mut self, lhs: &Binary, rhs: &Binary) -> Result<Binary, CapabilityError> {
        let request = EqRequest {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        };
        self.query(EQ_PATH, &request)
    }

    fn select(
        &mut self,
        condition: &Binary,
        if_true: &Binary,
        if_false: &Binary,
    ) -> Result<Binary, CapabilityError> {
        let request = SelectRequest {
            condition: condition.to_vec(),
            if_true: if_true.to_vec(),
            if_false: if_false.to_vec(),
        };
        self.query(SELECT_PATH, &request)
    }

    fn request_decryption(&mut self, ciphertext: &Binary) -> Result<RequestHandle, CapabilityError> {
        let request_id = self.next_request_id().map_err(capability_error)?;
        let msg = to_json_binary(&GatewayExecuteMsg::RequestDecryption {
            request_id,
            ciphertext: ciphertext.clone(),
        })
        .map_err(capability_error)?;

        self.messages.push(
            WasmMsg::Execute {
                contract_addr: self.gateway.to_string(),
                msg,
                funds: vec![],
            }
            .into(),
        );
        Ok(RequestHandle::new(request_id))
    }
}

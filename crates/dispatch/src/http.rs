//! HTTP transmitter (multipart uploads to the receiver).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use clipsend_protocol::TransferOption;
use clipsend_protocol::constants::{
    FIELD_CHUNK, FIELD_CHUNK_NUM, FIELD_CHUNKS, FIELD_OPTION, FIELD_VIDEO, RECEIVE_CHUNK_PATH,
    RECEIVE_PATH, chunk_part_name,
};
use clipsend_transfer::Chunk;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::transmitter::Transmitter;
use crate::types::Delivery;

/// Sends units to the receiver as multipart POST requests.
///
/// - whole file: `POST /receive` with `video` + `option`
/// - bundle: `POST /receive` with repeated `chunks` + `option`
/// - chunk: `POST /receive_chunk` with `chunk` + `option` + `chunk_num`
///
/// Only HTTP 200 counts as accepted.
#[derive(Debug, Clone)]
pub struct HttpTransmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransmitter {
    /// Creates a transmitter for the receiver at `endpoint`.
    ///
    /// `timeout` bounds each request end to end; `None` leaves it unbounded.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Creates a transmitter sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    /// Receiver base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    async fn post(&self, path: &str, form: Form) -> Delivery {
        let url = self.url(path);
        match self.client.post(&url).multipart(form).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => {
                debug!(%url, "receiver accepted upload");
                Delivery::Accepted
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                warn!(%url, status, "receiver rejected upload");
                Delivery::Rejected(status)
            }
            Err(e) => {
                warn!(%url, error = %e, "receiver unreachable");
                Delivery::Unreachable(e.to_string())
            }
        }
    }
}

impl Transmitter for HttpTransmitter {
    fn send_file(
        &self,
        name: String,
        data: Vec<u8>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move {
            let form = Form::new()
                .part(FIELD_VIDEO, Part::bytes(data).file_name(name))
                .text(FIELD_OPTION, option.as_str());
            self.post(RECEIVE_PATH, form).await
        })
    }

    fn send_bundle(
        &self,
        chunks: Vec<Chunk>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move {
            let form = chunks.into_iter().fold(Form::new(), |form, chunk| {
                let name = chunk_part_name(chunk.index);
                form.part(FIELD_CHUNKS, Part::bytes(chunk.data).file_name(name))
            });
            let form = form.text(FIELD_OPTION, option.as_str());
            self.post(RECEIVE_PATH, form).await
        })
    }

    fn send_chunk(
        &self,
        chunk: Chunk,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move {
            let index = chunk.index;
            let form = Form::new()
                .part(
                    FIELD_CHUNK,
                    Part::bytes(chunk.data).file_name(chunk_part_name(index)),
                )
                .text(FIELD_OPTION, option.as_str())
                .text(FIELD_CHUNK_NUM, index.to_string());
            self.post(RECEIVE_CHUNK_PATH, form).await
        })
    }
}

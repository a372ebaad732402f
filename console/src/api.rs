use std::{sync::mpsc, thread, time::Duration};

use anyhow::{bail, Result};
use record::{
    PenaltyRecord,
    payloads::{AddPenalty, ErrorBody, Rows},
    sheet::DataRow,
};
use reqwest::blocking::{Client, Response};

use crate::app::{Command, Delta};

/// Blocking client for the penalty backend.
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn add_penalty(&self, record: &PenaltyRecord) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/addPenalty", self.base))
            .json(&AddPenalty {
                values: record.clone(),
            })
            .send()?;

        if response.status().is_success() {
            return Ok(());
        }
        bail!(error_message(response));
    }

    pub fn get_penalties(&self) -> Result<Vec<DataRow>> {
        let response = self
            .http
            .get(format!("{}/getPenalties", self.base))
            .send()?;

        if !response.status().is_success() {
            bail!(error_message(response));
        }
        let body: Rows = response.json()?;
        Ok(body.rows)
    }
}

fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>() {
        Ok(body) => body.error,
        Err(_) => format!("backend returned {status}"),
    }
}

/// Runs backend requests off the UI thread, one command at a time.
pub fn spawn_provider(
    api: ApiClient,
    commands: mpsc::Receiver<Command>,
    deltas: mpsc::Sender<Delta>,
) {
    thread::spawn(move || {
        while let Ok(command) = commands.recv() {
            let delta = match command {
                Command::Submit(record) => {
                    Delta::Submitted(api.add_penalty(&record).map_err(|err| err.to_string()))
                }
                Command::Fetch => {
                    Delta::Penalties(api.get_penalties().map_err(|err| err.to_string()))
                }
            };
            if deltas.send(delta).is_err() {
                return;
            }
        }
    });
}

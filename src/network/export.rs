use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

/// One layer of an exported model.
///
/// `weights` is absent for the input layer; for the other layers it has one
/// row per incoming activation plus a trailing bias row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub activation: ActivationFunction,
    pub neurons: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Vec<f64>>>,
}

/// Persisted form of a trained network: `{"layers": [input, hidden, output]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub layers: Vec<LayerRecord>,
}

impl ModelDocument {
    pub fn from_network(network: &Network) -> ModelDocument {
        ModelDocument {
            layers: vec![
                LayerRecord {
                    kind: LayerKind::Input,
                    activation: ActivationFunction::Linear,
                    neurons: network.input_size(),
                    weights: None,
                },
                LayerRecord {
                    kind: LayerKind::Hidden,
                    activation: Network::HIDDEN_ACTIVATION,
                    neurons: network.hidden_size(),
                    weights: Some(network.hidden_weights().data.clone()),
                },
                LayerRecord {
                    kind: LayerKind::Output,
                    activation: Network::OUTPUT_ACTIVATION,
                    neurons: network.output_size(),
                    weights: Some(network.output_weights().data.clone()),
                },
            ],
        }
    }

    /// Validates the layer records and rebuilds the network they describe.
    pub fn into_network(self) -> Result<Network> {
        let [input, hidden, output]: [LayerRecord; 3] = self.layers.try_into().map_err(
            |layers: Vec<LayerRecord>| {
                Error::InvalidModel(format!("expected 3 layers, found {}", layers.len()))
            },
        )?;

        for (record, kind) in [(&input, LayerKind::Input), (&hidden, LayerKind::Hidden), (&output, LayerKind::Output)] {
            if record.kind != kind {
                return Err(Error::InvalidModel(format!(
                    "expected {kind:?} layer, found {:?}", record.kind
                )));
            }
            if record.neurons == 0 {
                return Err(Error::InvalidModel(format!("{kind:?} layer has no neurons")));
            }
        }
        if hidden.activation != Network::HIDDEN_ACTIVATION || output.activation != Network::OUTPUT_ACTIVATION {
            return Err(Error::InvalidModel("hidden and output layers must be logistic".into()));
        }

        let hidden_weights = weights_of(hidden, input.neurons + 1)?;
        let output_weights = weights_of(output, hidden_weights.cols + 1)?;
        Ok(Network::from_weights(hidden_weights, output_weights))
    }

    /// Like [`ModelDocument::into_network`], but also requires the network to
    /// take `inputs` values and produce `outputs` values.
    pub fn into_network_for(self, inputs: usize, outputs: usize) -> Result<Network> {
        let network = self.into_network()?;
        if network.input_size() != inputs || network.output_size() != outputs {
            return Err(Error::InvalidModel(format!(
                "model maps {} inputs to {} outputs, expected {inputs} to {outputs}",
                network.input_size(),
                network.output_size()
            )));
        }
        Ok(network)
    }

    /// Serializes the document to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        info!(path = %path.display(), "model written");
        Ok(())
    }

    /// Deserializes a document previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<ModelDocument> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Checks a layer's weight matrix is `rows × neurons`.
fn weights_of(record: LayerRecord, rows: usize) -> Result<Matrix> {
    let kind = record.kind;
    let neurons = record.neurons;
    let data = record
        .weights
        .ok_or_else(|| Error::InvalidModel(format!("{kind:?} layer has no weights")))?;

    if data.len() != rows || data.iter().any(|row| row.len() != neurons) {
        return Err(Error::InvalidModel(format!(
            "{kind:?} weights must be {rows}x{neurons}"
        )));
    }
    Ok(Matrix::from_data(data))
}

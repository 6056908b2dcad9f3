//! Prompt-driven inference over any reader/writer pair.

use std::io::{self, BufRead, Write};

use crate::data::dataset::DataFormat;
use crate::network::network::Network;
use crate::train::metrics::argmax;

const EXIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// Reads `format.inputs` raw readings per query, scales them, and prints the
/// network's outputs and predicted class.
///
/// Stops on end of input or an exit command (`q`, `quit`, `exit`) at any
/// prompt. A value that is not a number re-prompts the same field. Returns the
/// number of completed queries.
pub fn run<R, W>(network: &mut Network, format: &DataFormat, mut reader: R, mut writer: W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    let mut input = vec![0.0; format.inputs];
    let mut line = String::new();

    loop {
        writeln!(writer, "Input test data:")?;
        let mut field = 0;
        while field < format.inputs {
            write!(writer, "{}:", field + 1)?;
            writer.flush()?;

            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(answered);
            }
            let entry = line.trim();
            if EXIT_COMMANDS.contains(&entry) {
                return Ok(answered);
            }
            match entry.parse::<f64>() {
                Ok(value) => {
                    input[field] = value / format.scale_in;
                    field += 1;
                }
                Err(_) => writeln!(writer, "'{entry}' is not a number")?,
            }
        }

        let output = network.forward(&input);
        writeln!(writer, "Outputs:")?;
        writeln!(writer, "{output:?}")?;
        writeln!(writer, "Answer: {}", argmax(output))?;
        answered += 1;
    }
}

use crate::decoder::{DecodeError, DecoderFactory, EliminationHandler, PlayerEliminated, ReplayDecoder};

use std::io::{BufRead, BufReader, Read};

/// Decodes an elimination feed: one JSON `PlayerEliminated` record per line,
/// as exported from a replay by an external dumper. Blank lines are skipped.
pub struct KillFeedDecoder<'h> {
    reader: BufReader<Box<dyn Read + 'h>>,
    handlers: Vec<EliminationHandler<'h>>,
}

impl<'h> KillFeedDecoder<'h> {
    pub fn new(source: Box<dyn Read + 'h>) -> Self {
        KillFeedDecoder {
            reader: BufReader::new(source),
            handlers: Vec::new(),
        }
    }
}

impl<'h> ReplayDecoder<'h> for KillFeedDecoder<'h> {
    fn on_player_eliminated(&mut self, handler: EliminationHandler<'h>) {
        self.handlers.push(handler);
    }

    fn parse_to_end(&mut self) -> Result<(), DecodeError> {
        let mut line = String::new();
        let mut line_number = 0;
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            line_number += 1;

            let record = line.trim();
            if record.is_empty() {
                continue;
            }
            let event: PlayerEliminated =
                serde_json::from_str(record).map_err(|source| DecodeError::Malformed {
                    line: line_number,
                    source,
                })?;
            for handler in self.handlers.iter_mut() {
                handler(&event);
            }
        }
    }
}

/// Opens a [`KillFeedDecoder`] for every stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct KillFeedDecoderFactory;

impl DecoderFactory for KillFeedDecoderFactory {
    fn open<'h>(&self, source: Box<dyn Read + 'h>) -> Box<dyn ReplayDecoder<'h> + 'h> {
        Box::new(KillFeedDecoder::new(source))
    }
}

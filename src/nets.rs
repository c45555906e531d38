//! Reader for `.nets` files.
//!
//! ```text
//! UCLA nets 1.0
//! NumNets : 2
//! NumPins : 5
//! NetDegree : 2   n0
//!     o0  I : -0.500000  -6.000000
//!     o1  O :  0.000000   1.000000
//! NetDegree : 3   n1
//!     ...
//! ```
//!
//! Nets are produced one at a time by `NetReader`: a net is handed out
//! as soon as it has as many pins as its `NetDegree` line declared, or
//! when the next `NetDegree` line (or the end of the file) shows that it
//! will get no more.  Only the pins of the net being built are held in
//! memory.
//!
//! A pin line that arrives while no net is open (before the first
//! `NetDegree`, or after a net already has its declared pins) is
//! dropped with a warning.  The legacy tool carried such pins into the
//! next net instead, so on malformed files its `Pins:` total can be
//! higher than ours.
use std::io::BufRead;
use std::path::Path;

use log::{debug, info, warn};
use scan_fmt::scan_fmt;

use crate::bookshelf::{Direction, Net, Pin};
use crate::error::Result;
use crate::policy::{FieldKind, ParseOptions, RecoveryPolicy};
use crate::reader::{is_format_marker, tokens, LineReader};

/// A net still collecting pins.
struct OpenNet {
    net: Net,
    /// Declared degree; `None` when it was missing or unusable, in
    /// which case only the next header or end of file closes the net.
    expected: Option<usize>,
}

enum NetState {
    /// Between nets: after a net reached its degree, or before the
    /// first `NetDegree` line.
    Idle,
    Open(OpenNet),
}

/// Streams the nets of a `.nets` file in file order.
pub struct NetReader<R> {
    reader: LineReader<R>,
    policy: RecoveryPolicy,
    state: NetState,
    num_headers: usize,
    declared_nets: Option<usize>,
    declared_pins: Option<usize>,
    done: bool,
}

impl<R: BufRead> NetReader<R> {
    pub fn new(reader: LineReader<R>, opts: &ParseOptions) -> NetReader<R> {
        NetReader {
            reader,
            policy: opts.policy,
            state: NetState::Idle,
            num_headers: 0,
            declared_nets: None,
            declared_pins: None,
            done: false,
        }
    }

    /// `NumNets` from the header, once it has been read.
    pub fn declared_nets(&self) -> Option<usize> {
        self.declared_nets
    }

    /// `NumPins` from the header, once it has been read.
    pub fn declared_pins(&self) -> Option<usize> {
        self.declared_pins
    }

    fn flush(&mut self) -> Option<Net> {
        match std::mem::replace(&mut self.state, NetState::Idle) {
            NetState::Open(open) => {
                if let Some(d) = open.expected {
                    if open.net.degree() != d {
                        debug!("net {} closed with {} of {} pins", open.net.name, open.net.degree(), d);
                    }
                }
                Some(open.net)
            }
            NetState::Idle => None,
        }
    }

    fn next_net(&mut self) -> Result<Option<Net>> {
        loop {
            let line = match self.reader.getline()? {
                Some(line) => line,
                None => return Ok(self.flush()),
            };

            if is_format_marker(&line) {
                continue;
            }
            if line.starts_with("NumNets") {
                self.declared_nets = scan_fmt!(&line, "NumNets : {d}", usize).ok();
                continue;
            }
            if line.starts_with("NumPins") {
                self.declared_pins = scan_fmt!(&line, "NumPins : {d}", usize).ok();
                continue;
            }

            let toks = tokens(&line);
            if toks.is_empty() {
                continue;
            }

            if toks[0] == "NetDegree" {
                let finished = self.flush();
                self.open_net(&toks)?;
                if finished.is_some() {
                    return Ok(finished);
                }
                continue;
            }

            let pin = match self.pin(&toks)? {
                Some(pin) => pin,
                None => continue,
            };
            let complete = match &mut self.state {
                NetState::Open(open) => {
                    open.net.pins.push(pin);
                    open.expected == Some(open.net.degree())
                }
                NetState::Idle => {
                    warn!(
                        "{}:{}: pin on {} is outside any net, ignored",
                        self.reader.path().display(),
                        self.reader.line_number(),
                        pin.node_name
                    );
                    false
                }
            };
            if complete {
                return Ok(self.flush());
            }
        }
    }

    fn open_net(&mut self, toks: &[&str]) -> Result<()> {
        let index = self.num_headers;
        self.num_headers += 1;

        let expected = match toks.get(1) {
            Some(tok) => {
                match self.policy.parse::<usize>(
                    FieldKind::NetDegree,
                    tok,
                    self.reader.path(),
                    self.reader.line_number(),
                )? {
                    // A degree of zero never triggers a flush by count.
                    Some(0) => None,
                    Some(d) => Some(d),
                    // Dropping the header leaves its pins without a net.
                    None => return Ok(()),
                }
            }
            None => None,
        };
        // Block packing benchmarks leave nets unnamed.
        let name = toks
            .get(2)
            .map_or_else(|| format!("_net{}", index), |s| s.to_string());

        self.state = NetState::Open(OpenNet {
            net: Net {
                name,
                pins: Vec::with_capacity(expected.unwrap_or(0)),
            },
            expected,
        });
        Ok(())
    }

    /// A pin from `node dir : dx dy`.  Direction and offsets may be
    /// absent; a malformed offset zeroes both offsets under the default
    /// policy.
    fn pin(&self, toks: &[&str]) -> Result<Option<Pin>> {
        let direction = toks.get(1).map_or(Direction::Unknown, |t| Direction::from_token(t));

        let mut x_offset = 0.0;
        let mut y_offset = 0.0;
        if let (Some(sx), Some(sy)) = (toks.get(2), toks.get(3)) {
            match (sx.parse::<f64>(), sy.parse::<f64>()) {
                (Ok(x), Ok(y)) => {
                    x_offset = x;
                    y_offset = y;
                }
                _ => {
                    let bad = if sx.parse::<f64>().is_err() { sx } else { sy };
                    let fallback = self.policy.parse::<f64>(
                        FieldKind::PinOffset,
                        bad,
                        self.reader.path(),
                        self.reader.line_number(),
                    )?;
                    if fallback.is_none() {
                        return Ok(None);
                    }
                }
            }
        }

        Ok(Some(Pin {
            node_name: toks[0].to_string(),
            direction,
            x_offset,
            y_offset,
        }))
    }
}

impl<R: BufRead> Iterator for NetReader<R> {
    type Item = Result<Net>;

    fn next(&mut self) -> Option<Result<Net>> {
        if self.done {
            return None;
        }
        match self.next_net() {
            Ok(Some(net)) => Some(Ok(net)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// All nets of a design, in file order.
#[derive(Clone, Debug, Default)]
pub struct NetList {
    pub nets: Vec<Net>,
    pub declared_nets: Option<usize>,
    pub declared_pins: Option<usize>,
}

impl NetList {
    pub fn read(filepath: &Path, opts: &ParseOptions) -> Result<NetList> {
        let reader = LineReader::open(filepath)?;
        NetList::parse(reader, opts)
    }

    pub fn parse<R: BufRead>(reader: LineReader<R>, opts: &ParseOptions) -> Result<NetList> {
        let mut stream = NetReader::new(reader, opts);
        let nets = stream.by_ref().collect::<Result<Vec<Net>>>()?;

        let list = NetList {
            nets,
            declared_nets: stream.declared_nets(),
            declared_pins: stream.declared_pins(),
        };
        info!("Nets file has {} nets, {} pins", list.len(), list.num_pins());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Net> {
        self.nets.iter()
    }

    pub fn num_pins(&self) -> usize {
        self.nets.iter().map(|n| n.degree()).sum()
    }
}

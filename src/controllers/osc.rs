// src/controllers/osc.rs
// OSC Controller
//
// Address space:
//   /grid/columns i              column count for every grid
//   /grid/columns/target s i     column count for grids matching selector s
//   /panel/visible s i           show (i != 0) or hide the named panel

use log::{debug, warn};
use nannou_osc as osc;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    SetColumns { columns: u32 },
    SetTargetColumns { selector: String, columns: u32 },
    SetPanelVisibility { panel: String, visible: bool },
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                if let Some(command) = decode(&message.addr, &message.args) {
                    self.command_queue.push(command);
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

// Maps one OSC message to a command. Unknown addresses, mismatched
// arguments and column counts below 1 yield None.
pub fn decode(addr: &str, args: &[osc::Type]) -> Option<OscCommand> {
    match addr {
        "/grid/columns" => {
            if let [osc::Type::Int(columns)] = args {
                return column_count(*columns).map(|columns| OscCommand::SetColumns { columns });
            }
        }
        "/grid/columns/target" => {
            if let [osc::Type::String(selector), osc::Type::Int(columns)] = args {
                return column_count(*columns).map(|columns| OscCommand::SetTargetColumns {
                    selector: selector.clone(),
                    columns,
                });
            }
        }
        "/panel/visible" => {
            if let [osc::Type::String(panel), osc::Type::Int(setting)] = args {
                return Some(OscCommand::SetPanelVisibility {
                    panel: panel.clone(),
                    visible: *setting != 0,
                });
            }
        }
        _ => {
            debug!("Unknown OSC address pattern: {}", addr);
            return None;
        }
    }
    debug!("Unexpected arguments for {}: {:?}", addr, args);
    None
}

fn column_count(value: i32) -> Option<u32> {
    match u32::try_from(value) {
        Ok(columns) if columns >= 1 => Some(columns),
        _ => {
            warn!("Dropping invalid column count {}", value);
            None
        }
    }
}

//! Table-driven detector over a simulated set of cards.
//!
//! Useful wherever real port I/O is unavailable: the cards "on the bus" are whatever the table
//! holds, and cards may be inserted or pulled at any moment, from any thread.

use super::HardwareDetector;
use crate::{
    dev::{LogicalDeviceId, PnpId},
    error::DetectError,
    fdo::BusContext,
    settings::BusConfig,
};
use ::config::isapnp::MAX_CSN;
use alloc::vec::Vec;
use log::info;
use utils::sync::SpinLock;

// Card select numbers are one byte on the wire.
const _: () = assert!(MAX_CSN <= u8::MAX as usize);

/// One card on the simulated bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardInfo {
    pub vendor: PnpId,
    pub serial: u32,
    /// Number of logical devices (functions) on the card.
    pub functions: u8,
}

#[derive(Debug, Default)]
struct Faults {
    detect: Option<DetectError>,
    fill: Option<DetectError>,
}

#[derive(Debug)]
pub struct TableDetector {
    config: BusConfig,
    cards: SpinLock<Vec<CardInfo>>,
    decoded_ports: SpinLock<Vec<u16>>,
    faults: SpinLock<Faults>,
}

impl TableDetector {
    pub fn new(config: BusConfig) -> TableDetector {
        TableDetector {
            config,
            cards: SpinLock::new(Vec::new()),
            decoded_ports: SpinLock::new(Vec::new()),
            faults: SpinLock::new(Faults::default()),
        }
    }

    pub fn insert_card(&self, card: CardInfo) {
        self.cards.lock().push(card);
    }

    /// Pull the card with the given vendor id and serial; returns whether it was present.
    pub fn remove_card(&self, vendor: PnpId, serial: u32) -> bool {
        let mut cards = self.cards.lock();
        let before = cards.len();
        cards.retain(|card| card.vendor != vendor || card.serial != serial);
        cards.len() != before
    }

    /// Mark an I/O port as decoded by some other device, so it is skipped as read-data port.
    pub fn claim_port(&self, port: u16) {
        self.decoded_ports.lock().push(port);
    }

    /// Make every following [HardwareDetector::detect_read_data_port] fail with `err`.
    pub fn fail_detect(&self, err: Option<DetectError>) {
        self.faults.lock().detect = err;
    }

    /// Make every following [HardwareDetector::fill_device_list] fail with `err`.
    pub fn fail_fill(&self, err: Option<DetectError>) {
        self.faults.lock().fill = err;
    }
}

impl HardwareDetector for TableDetector {
    fn detect_read_data_port(&self, bus: &mut BusContext) -> Result<(), DetectError> {
        if let Some(err) = self.faults.lock().detect {
            return Err(err);
        }
        let decoded = self.decoded_ports.lock();
        let port = self
            .config
            .read_port_candidates()
            .find(|port| !decoded.contains(port))
            .ok_or(DetectError::NoReadDataPort)?;
        info!("Using read-data port {:#x}.", port);
        bus.read_data_port = Some(port);
        Ok(())
    }

    fn fill_device_list(&self, bus: &mut BusContext) -> Result<(), DetectError> {
        if let Some(err) = self.faults.lock().fill {
            return Err(err);
        }
        if bus.read_data_port.is_none() {
            return Err(DetectError::NoReadDataPort);
        }
        let cards = self.cards.lock();
        if cards.len() > MAX_CSN {
            return Err(DetectError::IsolationFailed);
        }
        let found = cards.iter().zip(1..=(MAX_CSN as u8)).flat_map(|(card, csn)| {
            (0..card.functions).map(move |function| {
                let id = LogicalDeviceId {
                    vendor: card.vendor,
                    serial: card.serial,
                    function,
                };
                (id, csn)
            })
        });
        bus.devices.reconcile(found);
        Ok(())
    }
}

//! Control requests sent to the bus node by the device framework.

use crate::{fdo::DeviceRelations, status::Status};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// PnP minor operation codes.
///
/// Requests carry the raw code; only the ones the bus node acts on matter to it, everything
/// else (including codes this enum does not know) is passed down the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MinorFunction {
    StartDevice = 0x00,
    QueryRemoveDevice = 0x01,
    RemoveDevice = 0x02,
    CancelRemoveDevice = 0x03,
    StopDevice = 0x04,
    QueryStopDevice = 0x05,
    CancelStopDevice = 0x06,
    QueryDeviceRelations = 0x07,
    QueryInterface = 0x08,
    QueryCapabilities = 0x09,
    QueryResources = 0x0A,
    QueryResourceRequirements = 0x0B,
    QueryDeviceText = 0x0C,
    FilterResourceRequirements = 0x0D,
    ReadConfig = 0x0F,
    WriteConfig = 0x10,
    Eject = 0x11,
    SetLock = 0x12,
    QueryId = 0x13,
    QueryPnpDeviceState = 0x14,
    QueryBusInformation = 0x15,
    DeviceUsageNotification = 0x16,
    SurpriseRemoval = 0x17,
}

/// Which relations a [MinorFunction::QueryDeviceRelations] request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum RelationKind {
    Bus = 0,
    Ejection = 1,
    Power = 2,
    Removal = 3,
    TargetDevice = 4,
    SingleBus = 5,
    Transport = 6,
}

#[derive(Debug)]
pub struct Request {
    minor: u8,
    relation: Option<RelationKind>,
    status: Status,
    relations: Option<DeviceRelations>,
}

impl Request {
    /// A request with a raw minor code, as it arrives from the framework.
    pub fn new(minor: u8) -> Request {
        Request {
            minor,
            relation: None,
            status: Status::default(),
            relations: None,
        }
    }

    pub fn start() -> Request {
        Request::new(MinorFunction::StartDevice.into())
    }

    pub fn stop() -> Request {
        Request::new(MinorFunction::StopDevice.into())
    }

    pub fn query_relations(kind: RelationKind) -> Request {
        let mut request = Request::new(MinorFunction::QueryDeviceRelations.into());
        request.relation = Some(kind);
        request
    }

    pub fn filter_resource_requirements() -> Request {
        Request::new(MinorFunction::FilterResourceRequirements.into())
    }

    /// Replace the status the request carries before it reaches the bus node.
    pub fn with_status(mut self, status: Status) -> Request {
        self.status = status;
        self
    }

    pub fn minor_code(&self) -> u8 {
        self.minor
    }

    /// Decoded minor code, [None] for codes unknown to this crate.
    pub fn minor_function(&self) -> Option<MinorFunction> {
        MinorFunction::try_from(self.minor).ok()
    }

    pub fn relation_kind(&self) -> Option<RelationKind> {
        self.relation
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn relations(&self) -> Option<&DeviceRelations> {
        self.relations.as_ref()
    }

    pub fn take_relations(&mut self) -> Option<DeviceRelations> {
        self.relations.take()
    }

    pub(crate) fn attach_relations(&mut self, relations: DeviceRelations) {
        self.relations = Some(relations);
    }
}

//! Request dispatch for the bus node.
//!
//! A request either completes here or goes down the stack, never both: the per-operation
//! handler moves it into exactly one [Disposition] variant and [BusNode::dispatch] acts on that.

use super::{BusNode, EnumerationError, enumerate};
use crate::{
    dev::DeviceState,
    error::BusError,
    request::{MinorFunction, RelationKind, Request},
    status::Status,
};
use log::warn;

/// What the bus node decided to do with a request.
#[derive(Debug)]
pub enum Disposition {
    /// The bus node produced the final answer; the request carries status and payload.
    Complete(Request),
    /// The request must be passed to the lower device untouched by further bus logic.
    Forward(Request),
}

/// Outcome of [BusNode::dispatch].
#[derive(Debug)]
pub enum Dispatched {
    /// Completed by the bus node.
    Completed(Request),
    /// Handed to the lower device, which returned this status.
    Forwarded(Status),
}

impl Dispatched {
    pub fn status(&self) -> Status {
        match self {
            Dispatched::Completed(request) => request.status(),
            Dispatched::Forwarded(status) => *status,
        }
    }

    pub fn is_forwarded(&self) -> bool {
        matches!(self, Dispatched::Forwarded(_))
    }

    /// The completed request, [None] if it went down the stack.
    pub fn into_request(self) -> Option<Request> {
        match self {
            Dispatched::Completed(request) => Some(request),
            Dispatched::Forwarded(_) => None,
        }
    }
}

impl BusNode {
    /// Serve one control request.
    pub fn dispatch(&self, request: Request) -> Dispatched {
        match self.handle(request) {
            Disposition::Complete(request) => Dispatched::Completed(request),
            Disposition::Forward(request) => Dispatched::Forwarded(self.lower.forward(request)),
        }
    }

    /// Decide on `request` without forwarding it.
    ///
    /// A [MinorFunction::StartDevice] request is still sent down synchronously here, since the
    /// bus node has to wait for the lower device before it can start.
    pub fn handle(&self, mut request: Request) -> Disposition {
        match request.minor_function() {
            Some(MinorFunction::StartDevice) => {
                let status = match self.start_device(&mut request) {
                    Ok(()) => Status::Success,
                    Err(status) => status,
                };
                request.set_status(status);
                Disposition::Complete(request)
            }
            Some(MinorFunction::StopDevice) => {
                self.state.store(DeviceState::Stopped);
                request.set_status(Status::Success);
                Disposition::Forward(request)
            }
            Some(MinorFunction::QueryDeviceRelations) => match request.relation_kind() {
                Some(RelationKind::Bus) => {
                    let status = self.query_bus_relations(&mut request);
                    request.set_status(status);
                    Disposition::Complete(request)
                }
                _ => Disposition::Forward(request),
            },
            Some(MinorFunction::FilterResourceRequirements) => {
                debug_ex!("IRP_MN_FILTER_RESOURCE_REQUIREMENTS");
                Disposition::Forward(request)
            }
            _ => {
                warn!("Unknown PnP code: {:#x}", request.minor_code());
                Disposition::Forward(request)
            }
        }
    }

    fn start_device(&self, request: &mut Request) -> Result<(), Status> {
        self.lower.forward_synchronous(request).into_result()?;
        let detected = {
            let mut context = self.context.lock();
            self.detector.detect_read_data_port(&mut context)
        };
        if let Err(err) = detected {
            warn!("Failed to detect the read-data port: {:?}.", err);
            return Err(err.into());
        }
        self.state.store(DeviceState::Started);
        Ok(())
    }

    fn query_bus_relations(&self, request: &mut Request) -> Status {
        let mut context = self.context.lock();
        if let Err(err) = self.detector.fill_device_list(&mut context) {
            warn!("Failed to refresh the device list: {:?}.", err);
            return err.into();
        }
        let built = enumerate(&context.devices, &*self.factory, &self.config);
        drop(context);

        match built {
            Ok(relations) => {
                request.attach_relations(relations);
                Status::Success
            }
            Err(EnumerationError::Allocation(err)) => BusError::from(err).into(),
            Err(EnumerationError::Partial { relations, error }) => {
                request.attach_relations(relations);
                BusError::from(error).into()
            }
        }
    }
}

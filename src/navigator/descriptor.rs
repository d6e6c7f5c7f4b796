//! Call-shape table for every bridge operation
//!
//! Each operation is described once here: how many domain arguments it takes,
//! whether it returns synchronously, and where the success and failure
//! continuations go in the argument list. The facade never hard-codes a
//! position; it asks [`OperationDescriptor::place`].

use super::bridge::BridgeArg;

/// How the bridge delivers the result of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Result is the return value of the bridge call; no continuations
    Sync,
    /// Result arrives through continuations.
    ///
    /// `None` for both indices appends success then failure after the
    /// domain arguments.
    Async {
        success_index: Option<usize>,
        error_index: Option<usize>,
    },
}

impl CallShape {
    const APPEND: CallShape = CallShape::Async {
        success_index: None,
        error_index: None,
    };
}

/// Static description of one bridge operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub operation: Operation,
    /// Bridge method name
    pub name: &'static str,
    /// Number of domain arguments, optional ones included
    pub arity: usize,
    pub shape: CallShape,
}

/// Operations exposed by the native plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Navigate,
    IsAppAvailable,
    AvailableApps,
    GetAppDisplayName,
    GetAppsForPlatform,
    SupportsTransportMode,
    GetTransportModes,
    SupportsLaunchMode,
    SupportsStart,
    SupportsStartName,
    SupportsDestName,
    UserSelect,
}

/// Every operation with its call shape
pub const OPERATIONS: [OperationDescriptor; 12] = [
    OperationDescriptor {
        operation: Operation::Navigate,
        name: "navigate",
        arity: 2,
        // plugin signature is navigate(destination, success, error, options)
        shape: CallShape::Async {
            success_index: Some(1),
            error_index: Some(2),
        },
    },
    OperationDescriptor {
        operation: Operation::IsAppAvailable,
        name: "isAppAvailable",
        arity: 1,
        shape: CallShape::APPEND,
    },
    OperationDescriptor {
        operation: Operation::AvailableApps,
        name: "availableApps",
        arity: 0,
        shape: CallShape::APPEND,
    },
    OperationDescriptor {
        operation: Operation::GetAppDisplayName,
        name: "getAppDisplayName",
        arity: 1,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::GetAppsForPlatform,
        name: "getAppsForPlatform",
        arity: 1,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::SupportsTransportMode,
        name: "supportsTransportMode",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::GetTransportModes,
        name: "getTransportModes",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::SupportsLaunchMode,
        name: "supportsLaunchMode",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::SupportsStart,
        name: "supportsStart",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::SupportsStartName,
        name: "supportsStartName",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::SupportsDestName,
        name: "supportsDestName",
        arity: 2,
        shape: CallShape::Sync,
    },
    OperationDescriptor {
        operation: Operation::UserSelect,
        name: "userSelect",
        arity: 2,
        shape: CallShape::Sync,
    },
];

impl Operation {
    pub fn descriptor(&self) -> &'static OperationDescriptor {
        // OPERATIONS is declared in enum order
        &OPERATIONS[*self as usize]
    }

    /// Bridge method name
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn is_sync(&self) -> bool {
        self.descriptor().is_sync()
    }

    /// Look an operation up by its bridge method name
    pub fn from_name(name: &str) -> Option<Operation> {
        OPERATIONS
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.operation)
    }
}

impl OperationDescriptor {
    pub fn is_sync(&self) -> bool {
        matches!(self.shape, CallShape::Sync)
    }

    /// Lay out the final bridge argument list.
    ///
    /// `args` holds one slot per domain argument; trailing `None`s (omitted
    /// optional arguments) are dropped and inner `None`s become JSON null.
    /// For async shapes the continuations are then spliced in: an index past
    /// the end pads with null up to it, otherwise the continuation is
    /// inserted at that index.
    pub fn place(
        &self,
        args: Vec<Option<serde_json::Value>>,
        continuations: Option<(BridgeArg, BridgeArg)>,
    ) -> Vec<BridgeArg> {
        debug_assert!(
            args.len() <= self.arity,
            "{} takes {} arguments, got {}",
            self.name,
            self.arity,
            args.len()
        );

        let supplied = args
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        let mut placed: Vec<BridgeArg> = args
            .into_iter()
            .take(supplied)
            .map(|arg| BridgeArg::Value(arg.unwrap_or(serde_json::Value::Null)))
            .collect();

        let (success, failure) = match (self.shape, continuations) {
            (CallShape::Async { success_index, error_index }, Some((success, failure))) => {
                ((success_index, success), (error_index, failure))
            }
            _ => return placed,
        };

        match (success.0, failure.0) {
            (None, None) => {
                placed.push(success.1);
                placed.push(failure.1);
            }
            (success_index, error_index) => {
                let len = placed.len();
                splice_at(&mut placed, success_index.unwrap_or(len), success.1);
                let len = placed.len();
                splice_at(&mut placed, error_index.unwrap_or(len), failure.1);
            }
        }

        placed
    }
}

fn splice_at(args: &mut Vec<BridgeArg>, index: usize, arg: BridgeArg) {
    if index > args.len() {
        args.resize_with(index, || BridgeArg::Value(serde_json::Value::Null));
        args.push(arg);
    } else {
        args.insert(index, arg);
    }
}

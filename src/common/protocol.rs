// Copyright 2026 The anf contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Protocol bits shared by all resources.

protocol_enum! {
    /// Provisioning state of a resource.
    enum ProvisioningState = Unknown {
        /// Request was accepted, work has not started yet.
        Accepted = "Accepted",
        /// Resource is being created.
        Creating = "Creating",
        /// Resource is being updated.
        Updating = "Updating",
        /// Resource is being deleted.
        Deleting = "Deleting",
        /// Resource is being moved to another group or subscription.
        Moving = "Moving",
        /// The last operation has succeeded.
        Succeeded = "Succeeded",
        /// The last operation has failed.
        Failed = "Failed",
        /// The last operation was cancelled.
        Canceled = "Canceled",

        /// Reported provisioning state is not supported.
        Unknown = ""
    }
}

impl ProvisioningState {
    /// The state a successful operation ends in.
    pub const STABLE: ProvisioningState = ProvisioningState::Succeeded;

    /// States a failed operation ends in.
    pub const FAILURES: [ProvisioningState; 2] =
        [ProvisioningState::Failed, ProvisioningState::Canceled];

    /// Whether the state is stable.
    ///
    /// Failure states are terminal, but are not considered stable.
    #[inline]
    pub fn is_stable(&self) -> bool {
        *self == Self::STABLE
    }

    /// Whether the state represents a failure.
    #[inline]
    pub fn is_failure(&self) -> bool {
        Self::FAILURES.contains(self)
    }

    /// Whether the state is final for the last operation.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_stable() || self.is_failure()
    }
}

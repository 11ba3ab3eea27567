// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Result;
use crate::sync::{Connection, Transaction};

/// The sub-transaction that scopes a copy-out.
///
/// It only exists to hold the parent's connection for the duration of the
/// copy; commit and rollback do nothing.
#[derive(Debug)]
pub(crate) struct CopyOutTransaction<'a, C: Connection> {
    connection: &'a mut C,
}

impl<'a, C: Connection> CopyOutTransaction<'a, C> {
    pub(crate) fn new<T>(parent: &'a mut T) -> Self
    where
        T: Transaction<ConnectionType = C>,
    {
        Self {
            connection: parent.connection(),
        }
    }
}

impl<C: Connection> Transaction for CopyOutTransaction<'_, C> {
    type ConnectionType = C;

    fn connection(&mut self) -> &mut C {
        self.connection
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }
}

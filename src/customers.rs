//! Option combinators over a tiny in-memory customer table.
//!
//! "Local" and "remote" lookups hit the same table; only the printed label
//! differs. The table is always passed in explicitly.

use crate::config::DemoConfig;
use crate::output;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
}

impl Customer {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Returned when neither source knows the id.
    pub fn fallback() -> Self {
        Self::new(1, "Bob")
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Customer(id={}, name={})", self.id, self.name)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CustomerDb {
    rows: HashMap<u32, Customer>,
}

impl CustomerDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, customer: Customer) {
        self.rows.insert(customer.id, customer);
    }

    pub fn get(&self, id: u32) -> Option<&Customer> {
        self.rows.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Customer> for CustomerDb {
    fn from_iter<I: IntoIterator<Item = Customer>>(iter: I) -> Self {
        let mut db = CustomerDb::new();
        for customer in iter {
            db.insert(customer);
        }
        db
    }
}

/// Branch-on-presence for `Option`: runs exactly one of the two actions.
///
/// Both actions receive `ctx`, so they can share a writer or an accumulator
/// without both closures borrowing it at once.
pub trait OptionExt<T> {
    fn if_present_or_else<C, R, P, A>(self, ctx: C, present: P, absent: A) -> R
    where
        P: FnOnce(C, T) -> R,
        A: FnOnce(C) -> R;
}

impl<T> OptionExt<T> for Option<T> {
    fn if_present_or_else<C, R, P, A>(self, ctx: C, present: P, absent: A) -> R
    where
        P: FnOnce(C, T) -> R,
        A: FnOnce(C) -> R,
    {
        match self {
            Some(value) => present(ctx, value),
            None => absent(ctx),
        }
    }
}

pub fn find_by_id(db: &CustomerDb, id: u32) -> Option<Customer> {
    db.get(id).cloned()
}

pub fn find_by_id_local(
    db: &CustomerDb,
    id: u32,
    out: &mut impl Write,
) -> io::Result<Option<Customer>> {
    writeln!(out, "checking local db for needful customer...")?;
    debug!(id, source = "local", "customer lookup");
    Ok(find_by_id(db, id))
}

pub fn find_by_id_remote(
    db: &CustomerDb,
    id: u32,
    out: &mut impl Write,
) -> io::Result<Option<Customer>> {
    writeln!(out, "checking remote db for needful customer...")?;
    debug!(id, source = "remote", "customer lookup");
    Ok(find_by_id(db, id))
}

/// Local, else remote, else [`Customer::fallback`].
///
/// The remote source is only asked when the local one misses.
pub fn find_with_fallback_in(
    local: &CustomerDb,
    remote: &CustomerDb,
    id: u32,
    out: &mut impl Write,
) -> io::Result<Customer> {
    let found = match find_by_id_local(local, id, out)? {
        Some(customer) => Some(customer),
        None => find_by_id_remote(remote, id, out)?,
    };
    Ok(found.unwrap_or_else(Customer::fallback))
}

/// Both "sources" are the same table in the lesson.
pub fn find_with_fallback(db: &CustomerDb, id: u32, out: &mut impl Write) -> io::Result<Customer> {
    find_with_fallback_in(db, db, id, out)
}

/// Resolves every id, silently skipping the ones that are missing.
pub fn find_all(db: &CustomerDb, ids: &[u32]) -> Vec<Customer> {
    ids.iter().flat_map(|&id| find_by_id(db, id)).collect()
}

pub fn not_found_message(id: u32) -> String {
    format!("Customer with id={} not found", id)
}

pub fn describe(db: &CustomerDb, id: u32, out: &mut impl Write) -> io::Result<()> {
    find_by_id_local(db, id, out)?.if_present_or_else(
        out,
        |out, customer| writeln!(out, "{}", customer),
        |out| writeln!(out, "{}", not_found_message(id)),
    )
}

pub fn run(config: &DemoConfig, out: &mut impl Write) -> io::Result<()> {
    let db: CustomerDb = config.customers.iter().cloned().collect();
    debug!(rows = db.len(), "customer table seeded");

    output::header(out, "Fallback chain")?;
    let customer = find_with_fallback(&db, config.lookup_id, out)?;
    writeln!(out, "{}", customer)?;

    output::header(out, "Option as a sequence")?;
    let found = find_all(&db, &config.batch_ids);
    writeln!(out, "{}", output::list(&found))?;

    output::header(out, "Present or else")?;
    describe(&db, config.lookup_id, out)
}

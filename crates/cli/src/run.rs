//! Wiring: build the collaborators, drive the workflow, print what happened.

use std::io::Write;
use std::sync::Arc;

use orderflow_core::{OrderId, PickupCode};
use orderflow_events::InMemoryEventBus;
use orderflow_infra::{
    AcceptOrderWorkflow, InMemoryOrderStore, OrderStatusProjection, OutcomeKind,
    StubOrderLookup, StubPickupCodeService,
};
use orderflow_observability::TracingLogger;
use orderflow_orders::{OrderAcceptedEvent, OrderLookup, PickupCodeService};

use crate::config::{Cli, Command, Target};

const STUB_PICKUP_CODE: &str = "pickupCode";
const STUB_ORDER_ID: &str = "orderId";

/// Summary of a run, one outcome per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<OutcomeKind>,
    pub published: usize,
}

/// Execute the parsed command, writing events (JSON lines) and outcomes to `out`.
///
/// Business rejections are reported and do not fail the run; the first technical
/// failure aborts it.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<RunReport> {
    let Command::Accept(args) = &cli.command;
    let targets = args.targets()?;

    if cli.stub {
        let lookup = StubOrderLookup::new(PickupCode::new(STUB_PICKUP_CODE)?);
        let codes = StubPickupCodeService::new(OrderId::new(STUB_ORDER_ID)?);
        return drive(lookup, &codes, None, &targets, out);
    }

    let store = Arc::new(InMemoryOrderStore::with_orders(cli.seed.orders().to_vec())?);
    tracing::info!(orders = store.len(), "order store seeded");

    let projection = OrderStatusProjection::new(Arc::clone(&store));
    drive(Arc::clone(&store), &*store, Some(&projection), &targets, out)
}

fn drive<L, C>(
    lookup: L,
    codes: &C,
    projection: Option<&OrderStatusProjection>,
    targets: &[Target],
    out: &mut impl Write,
) -> anyhow::Result<RunReport>
where
    L: OrderLookup,
    C: PickupCodeService + ?Sized,
{
    let bus: Arc<InMemoryEventBus<OrderAcceptedEvent>> = Arc::new(InMemoryEventBus::new());
    let subscription = bus.subscribe();
    let workflow = AcceptOrderWorkflow::new(lookup, Arc::clone(&bus), TracingLogger::new("accept_order"));

    let mut report = RunReport {
        outcomes: Vec::with_capacity(targets.len()),
        published: 0,
    };

    for target in targets {
        let outcome = match target {
            Target::OrderId(order_id) => workflow.accept_by_order_id(order_id)?,
            Target::PickupCode(code) => workflow.accept_by_pickup_code(codes, code)?,
        };

        // Deliver to the store before the next target so repeats see the new status.
        for event in subscription.drain() {
            if let Some(projection) = projection {
                projection.apply(&event)?;
            }
            serde_json::to_writer(&mut *out, &event)?;
            writeln!(out)?;
            report.published += 1;
        }

        writeln!(out, "{}\t{}", outcome.kind(), outcome.order_id())?;
        report.outcomes.push(outcome.kind());
    }

    Ok(report)
}

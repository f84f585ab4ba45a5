use crate::resource::{Acquired, Grant, PriorityResource};
use crate::sim::{SimError, SimTime};

fn granted<W>(a: Acquired<W>) -> (Grant, W) {
    match a {
        Acquired::Granted(g, w) => (g, w),
        Acquired::Queued(req) => panic!("expected grant, request {} was queued", req.id),
    }
}

fn queued<W>(a: Acquired<W>) {
    assert!(matches!(a, Acquired::Queued(_)), "expected request to be queued");
}

#[test]
fn zero_capacity_is_invalid_configuration() {
    let err = PriorityResource::<()>::new("lanes", 0).expect_err("capacity 0");
    assert!(matches!(
        err,
        SimError::InvalidConfiguration {
            field: "capacity",
            ..
        }
    ));
}

#[test]
fn grants_immediately_until_capacity_then_queues() {
    let mut r = PriorityResource::new("lanes", 2).expect("resource");
    assert_eq!(r.capacity(), 2);
    assert_eq!(r.name(), "lanes");

    let (g1, _) = granted(r.acquire(0, SimTime(0.0), "a"));
    let (g2, _) = granted(r.acquire(0, SimTime(0.5), "b"));
    queued(r.acquire(0, SimTime(1.0), "c"));

    assert_eq!(r.in_use(), 2);
    assert_eq!(r.queue_len(), 1);
    assert_eq!(g1.waited(), SimTime::ZERO);
    assert_eq!(g2.granted_at, SimTime(0.5));
    assert!(r.is_held(&g1));
}

#[test]
fn waiting_requests_with_equal_priority_are_granted_fifo() {
    let mut r = PriorityResource::new("lanes", 1).expect("resource");
    let (mut held, _) = granted(r.acquire(0, SimTime(0.0), "h"));
    queued(r.acquire(0, SimTime(1.0), "w1"));
    queued(r.acquire(0, SimTime(2.0), "w2"));
    queued(r.acquire(0, SimTime(2.0), "w3"));

    let mut order = Vec::new();
    for t in [3.0, 4.0, 5.0] {
        let (next, who) = r
            .release(&held, SimTime(t))
            .expect("release")
            .expect("promoted");
        assert_eq!(next.granted_at, SimTime(t));
        order.push(who);
        held = next;
    }
    assert_eq!(order, vec!["w1", "w2", "w3"]);
    assert_eq!(r.queue_len(), 0);
    assert_eq!(r.in_use(), 1);
}

#[test]
fn lower_priority_value_jumps_the_queue_but_never_evicts_holders() {
    // 容量 1，单元被持有到 5；1、2 时刻两个优先级 0 的请求，3 时刻一个优先级 -1 的请求。
    let mut r = PriorityResource::new("lanes", 1).expect("resource");
    let (holder, _) = granted(r.acquire(0, SimTime(0.0), "holder"));
    queued(r.acquire(0, SimTime(1.0), "a"));
    queued(r.acquire(0, SimTime(2.0), "b"));
    queued(r.acquire(-1, SimTime(3.0), "staff"));

    assert_eq!(r.in_use(), 1);
    assert!(r.is_held(&holder));
    assert_eq!(r.waiting_priorities(), vec![-1, 0, 0]);

    let (staff, who) = r
        .release(&holder, SimTime(5.0))
        .expect("release")
        .expect("promoted");
    assert_eq!(who, "staff");
    assert_eq!(staff.granted_at, SimTime(5.0));
    assert_eq!(staff.requested_at, SimTime(3.0));
    assert_eq!(staff.waited(), SimTime(2.0));

    let (_, who) = r
        .release(&staff, SimTime(6.0))
        .expect("release")
        .expect("promoted");
    assert_eq!(who, "a");
}

#[test]
fn release_without_waiters_frees_the_unit() {
    let mut r = PriorityResource::new("lanes", 1).expect("resource");
    let (g, _) = granted(r.acquire(0, SimTime(0.0), ()));
    assert!(r.release(&g, SimTime(1.0)).expect("release").is_none());
    assert_eq!(r.in_use(), 0);

    let (g2, _) = granted(r.acquire(5, SimTime(2.0), ()));
    assert_ne!(g.id, g2.id);
}

#[test]
fn releasing_a_grant_twice_is_an_unknown_grant() {
    let mut r = PriorityResource::new("lanes", 1).expect("resource");
    let (g, _) = granted(r.acquire(0, SimTime(0.0), ()));
    r.release(&g, SimTime(1.0)).expect("first release");

    let err = r.release(&g, SimTime(2.0)).expect_err("second release");
    assert_eq!(err, SimError::UnknownGrant(g.id, "lanes".to_string()));
}

#[test]
fn releasing_a_made_up_grant_is_an_unknown_grant() {
    let mut r = PriorityResource::<()>::new("lanes", 1).expect("resource");
    let fake = Grant {
        resource: r.id(),
        id: 99,
        priority: 0,
        requested_at: SimTime::ZERO,
        granted_at: SimTime::ZERO,
    };
    assert!(matches!(
        r.release(&fake, SimTime::ZERO),
        Err(SimError::UnknownGrant(99, _))
    ));
}

#[test]
fn grant_from_another_resource_with_same_id_is_rejected() {
    let mut a = PriorityResource::new("a", 1).expect("resource");
    let mut b = PriorityResource::new("b", 1).expect("resource");
    assert_ne!(a.id(), b.id());

    let (ga, _) = granted(a.acquire(0, SimTime::ZERO, "a0"));
    let (gb, _) = granted(b.acquire(0, SimTime::ZERO, "b0"));
    assert_eq!(ga.id, gb.id);
    assert!(a.is_held(&ga));
    assert!(!a.is_held(&gb));

    let err = a.release(&gb, SimTime(1.0)).expect_err("foreign grant");
    assert_eq!(err, SimError::UnknownGrant(gb.id, "a".to_string()));

    // a 的单元仍被原持有者占用，新的请求只能排队
    assert_eq!(a.in_use(), 1);
    queued(a.acquire(0, SimTime(1.0), "a1"));
    assert!(a.release(&ga, SimTime(2.0)).expect("owner release").is_some());
}

#[test]
fn stale_grant_with_reused_fields_is_rejected() {
    let mut r = PriorityResource::new("lanes", 1).expect("resource");
    let (g, _) = granted(r.acquire(0, SimTime::ZERO, ()));
    let forged = Grant {
        granted_at: SimTime(3.0),
        ..g
    };
    assert!(!r.is_held(&forged));
    assert!(r.release(&forged, SimTime(3.0)).is_err());
    assert_eq!(r.held_priorities(), vec![0]);
}

#[test]
fn held_units_never_exceed_capacity() {
    let mut r = PriorityResource::new("lanes", 3).expect("resource");
    let mut held = Vec::new();
    let mut now = 0.0;

    for i in 0..40u32 {
        now += 0.25;
        let priority = if i % 7 == 0 { -1 } else { 0 };
        if let Acquired::Granted(g, _) = r.acquire(priority, SimTime(now), i) {
            held.push(g);
        }
        assert!(r.in_use() <= r.capacity());

        if i % 3 == 2 && !held.is_empty() {
            let g = held.remove(0);
            if let Some((next, _)) = r.release(&g, SimTime(now)).expect("release") {
                held.push(next);
            }
            assert!(r.in_use() <= r.capacity());
        }
    }
    assert_eq!(r.in_use(), held.len());
}

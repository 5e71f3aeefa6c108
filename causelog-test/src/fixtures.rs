use causelog_core::{Event, Trace};

#[derive(Debug, Clone)]
pub struct TraceFixture {
    pub trace: Trace,
    pub expected_log_body: &'static str,
    pub expected_dropped: usize,
}

fn event(id: &str, process: &str, thread: i64, label: &str, parents: &[&str]) -> Event {
    Event::new(
        id,
        process,
        thread,
        label,
        parents.iter().map(|p| p.to_string()).collect(),
    )
}

/// Two events on `A0` followed by a receive on `B0`.
pub fn send_receive_fixture() -> TraceFixture {
    TraceFixture {
        trace: Trace {
            id: "send-receive".into(),
            events: vec![
                event("e1", "A", 0, "start", &[]),
                event("e2", "A", 0, "step", &["e1"]),
                event("e3", "B", 0, "recv", &["e2"]),
            ],
        },
        expected_log_body: concat!(
            "A0 {\"A0\":1}\n",
            "start\n",
            "A0 {\"A0\":2}\n",
            "step\n",
            "B0 {\"A0\":2,\"B0\":1}\n",
            "recv\n",
        ),
        expected_dropped: 0,
    }
}

/// `A0` fans a request out to `B0` and `C0`; both replies land back on `A0`
/// without seeing each other, then join. Reports arrive children-first.
pub fn fork_rejoin_fixture() -> TraceFixture {
    let mut request = event("a1", "frontend", 0, "request", &[]);
    request.agent = Some("gateway".into());
    request.timestamp = Some(1_704_110_400_000);

    TraceFixture {
        trace: Trace {
            id: "fork-rejoin".into(),
            events: vec![
                event("a4", "frontend", 0, "join", &["a2", "a3"]),
                event("a3", "frontend", 0, "reply-c", &["c1"]),
                event("c1", "cache", 0, "work-c", &["a1"]),
                event("a2", "frontend", 0, "reply-b", &["b1"]),
                event("b1", "backend", 0, "work-b", &["a1"]),
                request,
            ],
        },
        expected_log_body: concat!(
            "frontend0 {\"frontend0\":1}\n",
            "request\n",
            "cache0 {\"cache0\":1,\"frontend0\":1}\n",
            "work-c\n",
            "backend0 {\"backend0\":1,\"frontend0\":1}\n",
            "work-b\n",
            "frontend0 {\"cache0\":1,\"frontend0\":2}\n",
            "reply-c\n",
            "frontend0 {\"backend0\":1,\"frontend0\":3}\n",
            "reply-b\n",
            "frontend0 {\"backend0\":1,\"cache0\":1,\"frontend0\":4}\n",
            "join\n",
        ),
        expected_dropped: 0,
    }
}

/// One event references a parent that was never recorded; it and its child
/// cannot be placed.
pub fn orphan_fixture() -> TraceFixture {
    TraceFixture {
        trace: Trace {
            id: "orphans".into(),
            events: vec![
                event("e1", "A", 0, "start", &[]),
                event("e2", "B", 1, "lost", &["ghost"]),
                event("e3", "B", 1, "also-lost", &["e2"]),
                event("e4", "A", 0, "finish", &["e1"]),
            ],
        },
        expected_log_body: concat!(
            "A0 {\"A0\":1}\n",
            "start\n",
            "A0 {\"A0\":2}\n",
            "finish\n",
        ),
        expected_dropped: 2,
    }
}

/// Raw report JSON with fields the converter does not use.
pub const RAW_TRACE_WITH_EXTRA_FIELDS: &str = r#"[
  {
    "id": "raw-1",
    "reports": [
      {
        "ProcessName": "svc",
        "ThreadID": 12,
        "Label": "boot",
        "EventID": "r1",
        "ParentEventID": [],
        "Timestamp": 1704110400000,
        "HRT": 998877,
        "Agent": "init",
        "Host": "node-7",
        "Tags": ["startup"]
      },
      {
        "ProcessName": "svc",
        "ThreadID": 12,
        "Label": "ready",
        "EventID": "r2",
        "ParentEventID": ["r1"],
        "Timestamp": 1704110400250,
        "HRT": 999001,
        "Agent": "init"
      }
    ]
  }
]"#;

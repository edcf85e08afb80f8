//! Built-in demo documents, validated when `attestation` or `capability`
//! is run without a path.

use serde_json::{json, Value};

use anamnesis_core::Timestamp;

/// A complete attestation, stamped with the current time.
pub fn attestation() -> Value {
    json!({
        "attestation": {
            "id": "demo-001",
            "agent": "Babel",
            "created_at": Timestamp::now().to_iso8601(),
            "claim": {
                "type": "insight",
                "content": "Identity is the pruning function, not the pruned data",
                "context": "Discussion with Silia, 2026-02-07"
            },
            "salience": {
                "why_kept": "Core insight for Anamnesis architecture",
                "category": "foundational",
                "confidence": 0.85,
                "expected_decay": {"type": "permanent"}
            },
            "provenance": {
                "source": "inference",
                "witnesses": [],
                "chain": []
            }
        }
    })
}

/// A capability declaration, stamped with the current time.
pub fn capability() -> Value {
    let now = Timestamp::now().to_iso8601();
    json!({
        "capability": {
            "id": "cap-demo-001",
            "agent": "DemoAgent",
            "created_at": now,
            "updated_at": now,
            "domains": [{
                "name": "memory-systems",
                "description": "Agent memory architecture and persistence",
                "level": "competent",
                "keywords": ["memory", "persistence", "attestation"]
            }],
            "evidence": {
                "self_declared": {
                    "summary": "Built memory persistence tools, contributed to Anamnesis",
                    "examples": [{
                        "type": "code",
                        "reference": "github.com/example/memory-tool",
                        "description": "Memory persistence utility",
                        "date": "2026-02-01"
                    }]
                },
                "vouched": []
            },
            "status": {
                "active": true,
                "last_exercised": now,
                "decay_warning": "30 days"
            },
            "seeking": [{
                "domain": "trust-verification",
                "reason": "Want to improve my trust protocols",
                "can_offer": "Testing and feedback"
            }]
        }
    })
}

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Evaluation, Evaluator, ExecutionError};

/// Runs the submitted source (read from stdin) against an allow-listed set of
/// builtins and prints a single JSON report as its last stdout line.
const PRELUDE: &str = r#"
import json, sys, traceback

source = sys.stdin.read()
lines = []

def captured_print(*args, **kwargs):
    lines.append(" ".join(str(arg) for arg in args))

scope = {
    "__builtins__": {
        "print": captured_print,
        "len": len,
        "range": range,
        "str": str,
        "int": int,
        "float": float,
        "list": list,
        "dict": dict,
        "tuple": tuple,
        "set": set,
        "sum": sum,
        "max": max,
        "min": min,
    },
    "__name__": "__main__",
}
bindings = {}
error = None

try:
    exec(compile(source, "<string>", "exec"), scope, bindings)
    if "result" in bindings:
        lines.append("Result: %s" % (bindings["result"],))
except SyntaxError as e:
    error = "SyntaxError: %s (line %s)" % (e.msg, e.lineno)
except Exception as e:
    error = "%s: %s\n%s" % (type(e).__name__, e, traceback.format_exc())

sys.stdout.write("\n" + json.dumps({"output": "\n".join(lines), "error": error}) + "\n")
"#;

#[derive(Debug, Deserialize)]
struct Report {
    output: String,
    error: Option<String>,
}

pub struct PythonEvaluator {
    binary: String,
}

impl PythonEvaluator {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl Evaluator for PythonEvaluator {
    async fn evaluate(&self, code: &str, limit: Duration) -> Result<Evaluation, ExecutionError> {
        let mut child = Command::new(&self.binary)
            .arg("-c")
            .arg(PRELUDE)
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::RuntimeUnavailable {
                runtime: self.binary.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(code.as_bytes()).await?;
            // dropping stdin closes the pipe so the prelude's read() returns
        }

        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Ok(Evaluation::timed_out(format!(
                    "Execution timed out ({} ms limit)",
                    limit.as_millis()
                )))
            }
        };

        parse_report(&output.stdout, &output.stderr)
    }
}

fn parse_report(stdout: &[u8], stderr: &[u8]) -> Result<Evaluation, ExecutionError> {
    let stdout = String::from_utf8_lossy(stdout);
    let last_line = stdout.lines().rev().find(|line| !line.trim().is_empty());

    match last_line.map(serde_json::from_str::<Report>) {
        Some(Ok(report)) => Ok(Evaluation::new(report.output, report.error)),
        Some(Err(err)) => Err(ExecutionError::MalformedOutput(err.to_string())),
        None => {
            let stderr = String::from_utf8_lossy(stderr);
            Err(ExecutionError::MalformedOutput(format!(
                "interpreter produced no report: {}",
                stderr.trim()
            )))
        }
    }
}

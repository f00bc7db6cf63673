use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Evaluation, Evaluator, ExecutionError};

/// Node runs ignore the caller's timeout and always get this long.
pub const NODE_TIMEOUT: Duration = Duration::from_secs(30);

const WRAPPER_HEAD: &str = r#"
const realLog = console.log;
const realError = console.error;
const realWarn = console.warn;
const outputs = [];
const render = (args) => args.map(arg =>
    typeof arg === 'object' ? JSON.stringify(arg, null, 2) : String(arg)
).join(' ');

console.log = (...args) => { outputs.push(render(args)); };
console.error = (...args) => { outputs.push('Error: ' + render(args)); };
console.warn = (...args) => { outputs.push('Warning: ' + render(args)); };

try {
"#;

const WRAPPER_TAIL: &str = r#"
} catch (e) {
    outputs.push('Error: ' + (e && e.message !== undefined ? e.message : String(e)));
}

console.log = realLog;
console.error = realError;
console.warn = realWarn;

if (outputs.length > 0) {
    realLog(outputs.join('\n'));
}
"#;

pub fn wrap_source(code: &str) -> String {
    format!("{}{}{}", WRAPPER_HEAD, code, WRAPPER_TAIL)
}

pub struct NodeEvaluator {
    binary: String,
}

impl NodeEvaluator {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl Evaluator for NodeEvaluator {
    async fn evaluate(&self, code: &str, _: Duration) -> Result<Evaluation, ExecutionError> {
        let script = tempfile::Builder::new()
            .prefix("interview-")
            .suffix(".js")
            .tempfile()?;
        tokio::fs::write(script.path(), wrap_source(code)).await?;

        let child = Command::new(&self.binary)
            .arg(script.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::RuntimeUnavailable {
                runtime: self.binary.clone(),
                source,
            })?;

        let output = match timeout(NODE_TIMEOUT, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Ok(Evaluation::timed_out(
                    "Execution timed out (30 second limit)".to_string(),
                ))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let error = Some(stderr.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Evaluation::new(stdout.trim().to_string(), error))
    }
}

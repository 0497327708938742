use sharder_common::{PodInfo, Runtime};

pub const SSH_KEY_HINT: &str =
    "(The private key for ~/.ssh/id_ed25519 is pinned in the team chat channel.)";

/// One element of the pod info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Line(String),
    Code(String),
    Hint(String),
}

/// Turns a pod snapshot into the lines shown to the operator.
///
/// Only the first GPU is reported. Missing metrics are skipped rather than
/// printed as placeholders.
pub fn render(pod: &PodInfo) -> Vec<Directive> {
    let Some(runtime) = pod.runtime.as_ref() else {
        return vec![Directive::Line("Pod status: OFF".to_string())];
    };

    let mut out = vec![Directive::Line("Pod status: ON".to_string())];
    push_metrics(&mut out, runtime);

    out.push(Directive::Line("SSH command:".to_string()));
    match runtime.public_ssh_port().and_then(|p| p.address()) {
        Some((ip, port)) => out.push(Directive::Code(format!(
            "ssh root@{ip} -p {port} -i ~/.ssh/id_ed25519"
        ))),
        None => out.push(Directive::Line(
            "No public SSH port is exposed on this pod.".to_string(),
        )),
    }

    out.push(Directive::Hint(SSH_KEY_HINT.to_string()));
    out
}

fn push_metrics(out: &mut Vec<Directive>, runtime: &Runtime) {
    let container = runtime.container.as_ref();

    if let Some(v) = container.and_then(|c| c.memory_percent) {
        out.push(Directive::Line(format!("Memory Usage: {}%", percent(v))));
    }
    if let Some(v) = container.and_then(|c| c.cpu_percent) {
        out.push(Directive::Line(format!("CPU Usage: {}%", percent(v))));
    }
    if let Some(v) = runtime.gpus().first().and_then(|g| g.memory_util_percent) {
        out.push(Directive::Line(format!("GPU Memory Usage: {}%", percent(v))));
    }
}

// 42.0 -> "42", 33.3333 -> "33.33"
fn percent(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}")
}

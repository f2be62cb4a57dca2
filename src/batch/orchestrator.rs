use crate::batch::error::FailureReason;
use crate::batch::{BatchResult, Outcome};
use crate::mail::Deliver;
use crate::recipient::Recipient;
use crate::render::{RenderedArtifact, Renderer};
use crate::template::registry::TemplateRegistry;

/// A recipient failing never stops the others from being processed.
pub struct Orchestrator<'a, D: Deliver> {
    registry: &'a TemplateRegistry,
    renderer: &'a Renderer,
    mailer: &'a D,
}

impl<'a, D: Deliver> Orchestrator<'a, D> {
    pub fn new(registry: &'a TemplateRegistry, renderer: &'a Renderer, mailer: &'a D) -> Self {
        Self {
            registry,
            renderer,
            mailer,
        }
    }

    pub fn run(&self, recipients: &[Recipient]) -> BatchResult {
        let total = recipients.len();
        let mut result = BatchResult::default();

        for (index, recipient) in recipients.iter().enumerate() {
            println!("\n[{}/{total}] Processing: {recipient}", index + 1);
            let outcome = self.process(recipient);
            match &outcome {
                Outcome::Delivered { path, degraded } => info!(
                    "Certificate of {recipient} delivered [file: {path:?}, degraded: {degraded}]"
                ),
                Outcome::Failed(reason) => {
                    error!("Certificate of {recipient} failed\n{reason:#?}");
                    println!("  !! Failed for {recipient}: {}", reason.describe());
                }
            }
            result.record(recipient, &outcome);
        }

        info!(
            "Batch over: {} attempted, {} succeeded, {} failed",
            result.attempted(),
            result.succeeded(),
            result.failed()
        );
        result
    }

    pub fn process(&self, recipient: &Recipient) -> Outcome {
        match self.render_and_deliver(recipient) {
            Ok(artifact) => Outcome::Delivered {
                degraded: *artifact.degraded(),
                path: artifact.path().clone(),
            },
            Err(reason) => Outcome::Failed(reason),
        }
    }

    fn render_and_deliver(&self, recipient: &Recipient) -> Result<RenderedArtifact, FailureReason> {
        let descriptor = self.registry.resolve(recipient.group_key())?;

        let artifact = self.renderer.render(recipient, descriptor)?;
        println!("  -> Saved: {}", artifact.path().display());

        self.mailer.deliver(&artifact, descriptor)?;
        println!("  -> Email sent to {}", recipient.email());

        Ok(artifact)
    }
}

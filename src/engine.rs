use {
    crate::{
        error::{Error, Result},
        plugin::Plugin,
        structs::GlobalOptions,
        utils::expand_patterns,
    },
    futures::stream::{self, TryStreamExt},
    tokio::{sync::mpsc, time::sleep},
    tokio_util::sync::CancellationToken,
    tracing::info,
};

/// Feeds `words` through `plugin` with `global.threads` concurrent workers and hands
/// every emitted result to `on_result`. Stops at the first error the plugin returns
/// and cancels `token`. Returns the number of results emitted.
pub async fn run<P, F>(
    plugin: &P,
    global: &GlobalOptions,
    words: Vec<String>,
    token: &CancellationToken,
    mut on_result: F,
) -> Result<usize>
where
    P: Plugin,
    F: FnMut(P::Output),
{
    global.validate()?;
    plugin.pre_run(token).await?;

    let candidates: Vec<String> = words
        .iter()
        .flat_map(|word| expand_patterns(word, &global.patterns))
        .collect();
    info!(
        plugin = plugin.name(),
        candidates = candidates.len(),
        requests = candidates.len() * plugin.requests_per_run(),
        "Starting enumeration"
    );

    let (tx, mut rx) = mpsc::channel::<P::Output>(global.threads);

    let workers = async move {
        let tx = tx;
        let outcome = stream::iter(candidates.into_iter().map(Ok::<_, Error>))
            .try_for_each_concurrent(global.threads, |word| {
                let tx = &tx;
                async move {
                    if token.is_cancelled() {
                        return Ok(());
                    }
                    plugin.run(token, &word, tx).await?;
                    if !global.delay.is_zero() {
                        tokio::select! {
                            biased;
                            _ = token.cancelled() => {}
                            _ = sleep(global.delay) => {}
                        }
                    }
                    Ok(())
                }
            })
            .await;
        if outcome.is_err() {
            token.cancel();
        }
        outcome
    };

    let consumer = async {
        let mut emitted = 0;
        while let Some(result) = rx.recv().await {
            on_result(result);
            emitted += 1;
        }
        emitted
    };

    let (outcome, emitted) = tokio::join!(workers, consumer);
    outcome?;

    info!(plugin = plugin.name(), emitted, "Enumeration finished");
    Ok(emitted)
}

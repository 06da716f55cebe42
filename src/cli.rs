//!
//! Subcommands of the `dhmm` binary
//!
use crate::baum_welch::BaumWelchParams;
use crate::common::sequence_to_string;
use crate::error::{HmmError, Result};
use crate::io::{read_model, read_observations, write_model};
use crate::model::new_model;
use log::info;
use std::path::Path;

///
/// create a random model and save it
///
pub fn init(n_states: usize, n_symbols: usize, seed: u64, output: &Path) -> Result<()> {
    let model = new_model(n_states, n_symbols, seed)?;
    info!("created model\n{}", model);
    write_model(output, &model)
}

///
/// print the viterbi path of each observation sequence
///
pub fn decode(model: &Path, observations: &Path) -> Result<()> {
    let model = read_model(model)?;
    let seqs = read_observations(observations)?;
    info!("decoding {} sequences", seqs.len());
    for path in model.viterbi_all(&seqs)? {
        println!("{}", sequence_to_string(&path));
    }
    Ok(())
}

///
/// print the log-likelihood of each observation sequence
///
pub fn score(model: &Path, observations: &Path) -> Result<()> {
    let model = read_model(model)?;
    for seq in read_observations(observations)? {
        println!("{}", model.log_likelihood(&seq)?);
    }
    Ok(())
}

///
/// train the model on the first observation sequence and save it
///
pub fn train(
    model: &Path,
    observations: &Path,
    params: &BaumWelchParams,
    output: &Path,
) -> Result<()> {
    let model = read_model(model)?;
    let seqs = read_observations(observations)?;
    let seq = seqs.first().ok_or(HmmError::EmptySequence)?;
    if seqs.len() > 1 {
        info!("{} sequences given, training on the first", seqs.len());
    }
    let r = model.train(seq, params)?;
    for (i, ll) in r.log_likelihoods.iter().enumerate() {
        println!("#{} log_likelihood={}", i, ll);
    }
    println!("# n_iter={} converged={}", r.n_iter, r.is_converged);
    write_model(output, &r.model)
}

///
/// print a sequence sampled from the model
///
pub fn sample(model: &Path, length: usize, seed: u64) -> Result<()> {
    let model = read_model(model)?;
    let h = model.sample(length, seed)?;
    println!("# states={}", sequence_to_string(&h.states));
    println!("{}", sequence_to_string(&h.observations));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mocks::mock_two_state;

    #[test]
    fn cli_init_train_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("init.json");
        let trained_path = dir.path().join("trained.json");
        let obs_path = dir.path().join("obs.txt");
        std::fs::write(&obs_path, "0 0 0 1 1 1 1 0 0 1 1 0 0 0 0 1\n0 1\n").unwrap();

        init(2, 2, 42, &model_path).unwrap();
        train(
            &model_path,
            &obs_path,
            &BaumWelchParams::fixed(5),
            &trained_path,
        )
        .unwrap();
        let trained = read_model(&trained_path).unwrap();
        let initial = read_model(&model_path).unwrap();
        assert_eq!(trained.init(), initial.init());
        assert_ne!(trained.trans(), initial.trans());

        decode(&trained_path, &obs_path).unwrap();
        score(&trained_path, &obs_path).unwrap();
        sample(&trained_path, 10, 0).unwrap();
    }
    #[test]
    fn cli_train_without_observations() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let obs_path = dir.path().join("obs.txt");
        std::fs::write(&obs_path, "# nothing\n").unwrap();
        write_model(&model_path, &mock_two_state()).unwrap();
        assert!(matches!(
            train(
                &model_path,
                &obs_path,
                &BaumWelchParams::default(),
                &dir.path().join("out.json"),
            ),
            Err(HmmError::EmptySequence)
        ));
    }
}

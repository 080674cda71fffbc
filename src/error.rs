use derive_more::From;

#[derive(Debug, From)]
pub enum Error {
    #[from]
    Selection(crate::pipeline::RejectionReason),

    #[from]
    Inference(crate::clients::InferenceError),

    #[from]
    Io(std::io::Error),
}

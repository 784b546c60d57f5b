use crate::GuessMap;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Starts a session for `problem_name` and returns the name the service acknowledged.
    async fn select_problem(&self, problem_name: &str) -> Result<String>;

    /// Runs every plan from the starting room. Returns one label sequence per plan
    /// (plan length + 1 labels, starting room included) and the total query count.
    async fn explore(&self, plans: Vec<String>) -> Result<(Vec<Vec<u8>>, u32)>;

    async fn guess(&self, map: &GuessMap) -> Result<bool>;
}

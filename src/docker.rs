//! Docker-backed command transport
//!
//! Runs jj commands inside a container by wrapping each argument vector in
//! `docker exec`. Can either attach to a running container or start a fresh
//! one from an image:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use jj_client::{DockerExecutor, DockerOptions, Repo};
//!
//! # async fn demo() -> Result<(), jj_client::JjError> {
//! let executor = DockerExecutor::start(
//!     "my-jj-image",
//!     DockerOptions {
//!         workdir: Some("/repo".to_string()),
//!         volumes: vec![("/host/repo".to_string(), "/repo".to_string())],
//!         ..DockerOptions::default()
//!     },
//! )
//! .await?;
//!
//! let repo = Repo::with_options(Some("/repo".into()), "jj", Some(Arc::new(executor.clone())))?;
//! let changes = repo.log(Default::default()).await?;
//! executor.stop().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Containers started here are also stopped by a drop guard if [`stop`] was
//! never awaited, so teardown happens on every exit path.
//!
//! [`stop`]: DockerExecutor::stop

use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::constants;
use crate::error::JjError;
use crate::executor::{CommandOutput, Executor};

/// Options for starting or attaching to a container
#[derive(Debug, Clone, Default)]
pub struct DockerOptions {
    /// Working directory inside the container
    pub workdir: Option<String>,
    /// User to run as inside the container
    pub user: Option<String>,
    /// Environment variables passed with `-e`, in order
    pub env: Vec<(String, String)>,
    /// host-path to container-path mounts (start only)
    pub volumes: Vec<(String, String)>,
    /// host-port to container-port mappings (start only)
    pub ports: Vec<(u16, u16)>,
    /// Override the docker binary (defaults to "docker")
    pub docker_path: Option<String>,
}

/// Executor that runs jj commands inside a Docker container
#[derive(Debug, Clone)]
pub struct DockerExecutor {
    container: String,
    workdir: Option<String>,
    user: Option<String>,
    env: Vec<(String, String)>,
    docker_path: String,
    owned: Option<Arc<ContainerGuard>>,
}

impl DockerExecutor {
    /// Attach to an already-running container.
    ///
    /// [`stop`](Self::stop) is a no-op for attached containers.
    pub fn attach(container: impl Into<String>, options: DockerOptions) -> Self {
        Self {
            container: container.into(),
            workdir: options.workdir,
            user: options.user,
            env: options.env,
            docker_path: options
                .docker_path
                .unwrap_or_else(|| constants::DOCKER_COMMAND.to_string()),
            owned: None,
        }
    }

    /// Start a new container from `image` and return an executor bound to it.
    ///
    /// Fails immediately with the captured stderr if the container cannot be
    /// started; there is no retry.
    pub async fn start(image: &str, options: DockerOptions) -> Result<Self, JjError> {
        let docker_path = options
            .docker_path
            .clone()
            .unwrap_or_else(|| constants::DOCKER_COMMAND.to_string());
        let cmd = run_command(&docker_path, image, &options);

        debug!(command = %cmd.join(" "), "starting container");
        let output = Command::new(&cmd[0])
            .args(&cmd[1..])
            .kill_on_drop(true)
            .output()
            .await?;
        if !output.status.success() {
            return Err(JjError::CommandFailed {
                command: cmd,
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let container = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            owned: Some(Arc::new(ContainerGuard {
                docker_path: docker_path.clone(),
                container: container.clone(),
                stopped: AtomicBool::new(false),
            })),
            container,
            workdir: options.workdir,
            user: options.user,
            env: options.env,
            docker_path,
        })
    }

    /// The container id or name this executor targets
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Stop the container, if this executor started it.
    ///
    /// Attached containers are left running. Stopping twice is a no-op, and
    /// a container that already exited is not an error.
    pub async fn stop(&self) -> Result<(), JjError> {
        let Some(guard) = &self.owned else {
            return Ok(());
        };
        if !guard.begin_stop() {
            return Ok(());
        }
        debug!(container = %self.container, "stopping container");
        Command::new(&self.docker_path)
            .args(["stop", &self.container])
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(())
    }

    /// Wrap `cmd` in the `docker exec` invocation for this container
    fn exec_command(&self, cmd: &[String]) -> Vec<String> {
        let mut wrapped = vec![self.docker_path.clone(), "exec".to_string()];
        if let Some(workdir) = &self.workdir {
            wrapped.push("-w".to_string());
            wrapped.push(workdir.clone());
        }
        if let Some(user) = &self.user {
            wrapped.push("-u".to_string());
            wrapped.push(user.clone());
        }
        for (key, value) in &self.env {
            wrapped.push("-e".to_string());
            wrapped.push(format!("{key}={value}"));
        }
        wrapped.push(self.container.clone());
        wrapped.extend(cmd.iter().cloned());
        wrapped
    }
}

#[async_trait]
impl Executor for DockerExecutor {
    async fn execute(&self, cmd: &[String]) -> Result<CommandOutput, JjError> {
        let wrapped = self.exec_command(cmd);
        debug!(command = %wrapped.join(" "), "running command in container");
        let output = Command::new(&wrapped[0])
            .args(&wrapped[1..])
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(CommandOutput {
            // report the original argument vector, not the docker-wrapped one
            args: cmd.to_vec(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Build the `docker run` argument vector for [`DockerExecutor::start`]
fn run_command(docker_path: &str, image: &str, options: &DockerOptions) -> Vec<String> {
    let mut cmd = vec![
        docker_path.to_string(),
        "run".to_string(),
        "-d".to_string(),
        "--rm".to_string(),
    ];
    if let Some(workdir) = &options.workdir {
        cmd.push("-w".to_string());
        cmd.push(workdir.clone());
    }
    if let Some(user) = &options.user {
        cmd.push("-u".to_string());
        cmd.push(user.clone());
    }
    for (key, value) in &options.env {
        cmd.push("-e".to_string());
        cmd.push(format!("{key}={value}"));
    }
    for (host_path, container_path) in &options.volumes {
        cmd.push("-v".to_string());
        cmd.push(format!("{host_path}:{container_path}"));
    }
    for (host_port, container_port) in &options.ports {
        cmd.push("-p".to_string());
        cmd.push(format!("{host_port}:{container_port}"));
    }
    // a long sleep keeps the container alive between exec calls
    cmd.push(image.to_string());
    cmd.push("sleep".to_string());
    cmd.push("infinity".to_string());
    cmd
}

/// Stops the started container when the last clone goes away, unless
/// [`DockerExecutor::stop`] already did.
#[derive(Debug)]
struct ContainerGuard {
    docker_path: String,
    container: String,
    stopped: AtomicBool,
}

impl ContainerGuard {
    /// Returns true exactly once; later callers see the stop as done.
    fn begin_stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::SeqCst)
    }
}

impl Drop for ContainerGuard {
    fn drop(&mut self) {
        if !self.begin_stop() {
            return;
        }
        let _ = std::process::Command::new(&self.docker_path)
            .args(["stop", &self.container])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}

// Backgrounding: detach from the controlling terminal the way daemon(3)
// does. Must run before the tokio runtime exists - forking a process with
// live runtime threads is not survivable.

use std::io;

/// Fork into the background: parent exits, child gets a new session, chdirs
/// to `/`, and points stdio at `/dev/null`. Terminal job-control signals are
/// ignored afterwards since they have no meaning for a detached process.
pub fn daemonize() -> anyhow::Result<()> {
    unsafe {
        match libc::fork() {
            -1 => return Err(errno("fork")),
            0 => {}
            _ => libc::_exit(0),
        }

        if libc::setsid() == -1 {
            return Err(errno("setsid"));
        }
        if libc::chdir(c"/".as_ptr()) == -1 {
            return Err(errno("chdir"));
        }

        let devnull = libc::open(c"/dev/null".as_ptr(), libc::O_RDWR);
        if devnull == -1 {
            return Err(errno("open /dev/null"));
        }
        for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
            if libc::dup2(devnull, fd) == -1 {
                return Err(errno("dup2"));
            }
        }
        if devnull > libc::STDERR_FILENO {
            libc::close(devnull);
        }

        libc::signal(libc::SIGTTOU, libc::SIG_IGN);
        libc::signal(libc::SIGTTIN, libc::SIG_IGN);
        libc::signal(libc::SIGTSTP, libc::SIG_IGN);
    }
    Ok(())
}

fn errno(op: &str) -> anyhow::Error {
    anyhow::anyhow!("failed to daemonise ({}): {}", op, io::Error::last_os_error())
}

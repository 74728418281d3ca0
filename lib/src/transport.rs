use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use bytes::Bytes;
use log::debug;

use crate::constants::RECV_BUF_LEN;
use crate::util::print_bytes;

// 引擎只通过这个口子碰socket，测试用脚本实现替换

pub trait Transport {
    fn send(&mut self, buf: &[u8], dest: SocketAddr) -> io::Result<()>;

    // 超时之内没有数据报返回None，超时就是超时，不重发
    fn recv(&mut self, timeout: Duration) -> io::Result<Option<Bytes>>;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

pub struct UdpTransport<'a> {
    socket: &'a UdpSocket,
    recv_buf: Vec<u8>,
}

impl<'a> UdpTransport<'a> {
    pub fn new(socket: &'a UdpSocket) -> Self {
        Self {
            socket,
            recv_buf: vec![0u8; RECV_BUF_LEN],
        }
    }
}

impl Transport for UdpTransport<'_> {
    fn send(&mut self, buf: &[u8], dest: SocketAddr) -> io::Result<()> {
        let sent = self.socket.send_to(buf, dest)?;
        debug!(
            "{:?} --> {}, sent: {}\n{}",
            self.socket.local_addr(),
            dest,
            sent,
            print_bytes(buf, " ", 8)
        );
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> io::Result<Option<Bytes>> {
        self.socket.set_read_timeout(Some(timeout))?;

        match self.socket.recv_from(&mut self.recv_buf) {
            Ok((len, remote_addr)) => {
                let data = Bytes::copy_from_slice(&self.recv_buf[..len]);
                debug!(
                    "{:?} <-- {}, recv: {}\n{}",
                    self.socket.local_addr(),
                    remote_addr,
                    len,
                    print_bytes(&data, " ", 8)
                );
                Ok(Some(data))
            }
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::TimedOut =>
            {
                debug!("recv timeout after {:?}", timeout);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}
